//! Static registry of value generators, keyed by dotted generator path.
//!
//! Paths are resolved when the schema is interpreted, so an unknown path
//! never reaches row generation.

use chrono::{Duration, Utc};
use fake::faker::address::en::{CityName, CountryName, StateName, StreetName, ZipCode};
use fake::faker::company::en::{Buzzword, CatchPhrase, CompanyName, Industry};
use fake::faker::internet::en::{DomainSuffix, IPv4, SafeEmail, Username};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use rand::distr::Alphanumeric;
use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::Rng;
use serde_json::Value;

/// Produces one value from the field's option bag.
pub type GeneratorFn = fn(&Value, &mut StdRng) -> Value;

const GENERATORS: &[(&str, GeneratorFn)] = &[
    ("faker.person.fullName", person_full_name),
    ("faker.person.firstName", person_first_name),
    ("faker.person.lastName", person_last_name),
    ("faker.person.jobTitle", person_job_title),
    ("faker.internet.email", internet_email),
    ("faker.internet.userName", internet_user_name),
    ("faker.internet.url", internet_url),
    ("faker.internet.ipv4", internet_ipv4),
    ("faker.location.city", location_city),
    ("faker.location.country", location_country),
    ("faker.location.state", location_state),
    ("faker.location.street", location_street),
    ("faker.location.zipCode", location_zip_code),
    ("faker.company.name", company_name),
    ("faker.company.catchPhrase", company_catch_phrase),
    ("faker.company.industry", company_industry),
    ("faker.commerce.productName", commerce_product_name),
    ("faker.commerce.price", commerce_price),
    ("faker.commerce.department", commerce_department),
    ("faker.lorem.word", lorem_word),
    ("faker.lorem.words", lorem_words),
    ("faker.lorem.sentence", lorem_sentence),
    ("faker.lorem.paragraph", lorem_paragraph),
    ("faker.phone.number", phone_number),
    ("faker.number.int", number_int),
    ("faker.datatype.boolean", datatype_boolean),
    ("faker.string.uuid", string_uuid),
    ("faker.string.alphanumeric", string_alphanumeric),
    ("faker.date.past", date_past),
    ("faker.date.future", date_future),
    ("faker.date.recent", date_recent),
    ("faker.image.url", image_url),
];

pub fn lookup(path: &str) -> Option<GeneratorFn> {
    GENERATORS
        .iter()
        .find(|(p, _)| *p == path)
        .map(|(_, f)| *f)
}

pub fn paths() -> impl Iterator<Item = &'static str> {
    GENERATORS.iter().map(|(p, _)| *p)
}

fn opt_i64(options: &Value, key: &str) -> Option<i64> {
    options.get(key).and_then(Value::as_i64)
}

fn opt_f64(options: &Value, key: &str) -> Option<f64> {
    options.get(key).and_then(Value::as_f64)
}

/// Upper bounds on size options. Config outside them is rejected by
/// [`check_options`]; generators clamp to them as well.
pub const MAX_WORDS: i64 = 1_000;
pub const MAX_LENGTH: i64 = 10_000;
pub const MAX_YEARS: i64 = 100;
pub const MAX_DAYS: i64 = MAX_YEARS * 365;
pub const MAX_IMAGE_SIDE: i64 = 10_000;
pub const MAX_PRICE: f64 = 1e12;

/// Validate a generator's numeric options. `Err` carries the reason.
pub fn check_options(path: &str, options: &Value) -> Result<(), String> {
    let bounded: &[(&str, i64, i64)] = match path {
        "faker.lorem.words" | "faker.lorem.sentence" | "faker.lorem.paragraph" => {
            &[("count", 1, MAX_WORDS), ("min", 1, MAX_WORDS), ("max", 1, MAX_WORDS)]
        }
        "faker.string.alphanumeric" => &[("length", 0, MAX_LENGTH)],
        "faker.date.past" | "faker.date.future" => &[("years", 1, MAX_YEARS)],
        "faker.date.recent" => &[("days", 1, MAX_DAYS)],
        "faker.image.url" => &[("width", 1, MAX_IMAGE_SIDE), ("height", 1, MAX_IMAGE_SIDE)],
        _ => &[],
    };
    for (key, lo, hi) in bounded {
        let Some(v) = options.get(*key) else { continue };
        match v.as_i64() {
            Some(n) if (*lo..=*hi).contains(&n) => {}
            _ => return Err(format!("option '{}' must be an integer in {}..={}", key, lo, hi)),
        }
    }
    if path == "faker.commerce.price" {
        for key in ["min", "max"] {
            let Some(v) = options.get(key) else { continue };
            match v.as_f64() {
                Some(n) if (-MAX_PRICE..=MAX_PRICE).contains(&n) => {}
                _ => return Err(format!("option '{}' must be a number within ±{}", key, MAX_PRICE)),
            }
        }
    }
    Ok(())
}

/// `(min, max)` from options, swapped when given out of order.
fn int_range(options: &Value, default_min: i64, default_max: i64) -> (i64, i64) {
    let min = opt_i64(options, "min").unwrap_or(default_min);
    let max = opt_i64(options, "max").unwrap_or(default_max);
    if min <= max {
        (min, max)
    } else {
        (max, min)
    }
}

/// Word/sentence counts: `count` wins over `min`/`max`.
fn count_range(options: &Value, default_min: usize, default_max: usize) -> std::ops::Range<usize> {
    if let Some(count) = opt_i64(options, "count") {
        let count = count.clamp(1, MAX_WORDS) as usize;
        return count..count + 1;
    }
    let (min, max) = int_range(options, default_min as i64, default_max as i64);
    let min = min.clamp(1, MAX_WORDS) as usize;
    let max = (max.clamp(1, MAX_WORDS) as usize).max(min);
    min..max + 1
}

fn text(s: String) -> Value {
    Value::String(s)
}

fn person_full_name(_: &Value, rng: &mut StdRng) -> Value {
    text(Name().fake_with_rng(rng))
}

fn person_first_name(_: &Value, rng: &mut StdRng) -> Value {
    text(FirstName().fake_with_rng(rng))
}

fn person_last_name(_: &Value, rng: &mut StdRng) -> Value {
    text(LastName().fake_with_rng(rng))
}

fn person_job_title(_: &Value, rng: &mut StdRng) -> Value {
    text(JobTitle().fake_with_rng(rng))
}

fn internet_email(_: &Value, rng: &mut StdRng) -> Value {
    text(SafeEmail().fake_with_rng(rng))
}

fn internet_user_name(_: &Value, rng: &mut StdRng) -> Value {
    text(Username().fake_with_rng(rng))
}

fn internet_url(_: &Value, rng: &mut StdRng) -> Value {
    let host: String = Word().fake_with_rng(rng);
    let suffix: String = DomainSuffix().fake_with_rng(rng);
    text(format!("https://{}.{}", host.to_lowercase(), suffix))
}

fn internet_ipv4(_: &Value, rng: &mut StdRng) -> Value {
    text(IPv4().fake_with_rng(rng))
}

fn location_city(_: &Value, rng: &mut StdRng) -> Value {
    text(CityName().fake_with_rng(rng))
}

fn location_country(_: &Value, rng: &mut StdRng) -> Value {
    text(CountryName().fake_with_rng(rng))
}

fn location_state(_: &Value, rng: &mut StdRng) -> Value {
    text(StateName().fake_with_rng(rng))
}

fn location_street(_: &Value, rng: &mut StdRng) -> Value {
    let number = rng.random_range(1..=9999);
    let street: String = StreetName().fake_with_rng(rng);
    text(format!("{} {}", number, street))
}

fn location_zip_code(_: &Value, rng: &mut StdRng) -> Value {
    text(ZipCode().fake_with_rng(rng))
}

fn company_name(_: &Value, rng: &mut StdRng) -> Value {
    text(CompanyName().fake_with_rng(rng))
}

fn company_catch_phrase(_: &Value, rng: &mut StdRng) -> Value {
    text(CatchPhrase().fake_with_rng(rng))
}

fn company_industry(_: &Value, rng: &mut StdRng) -> Value {
    text(Industry().fake_with_rng(rng))
}

fn commerce_product_name(_: &Value, rng: &mut StdRng) -> Value {
    let adjective: String = Buzzword().fake_with_rng(rng);
    let noun: String = Word().fake_with_rng(rng);
    text(format!("{} {}", capitalize(&adjective), noun))
}

fn commerce_price(options: &Value, rng: &mut StdRng) -> Value {
    let min = opt_f64(options, "min").unwrap_or(1.0).clamp(-MAX_PRICE, MAX_PRICE);
    let max = opt_f64(options, "max").unwrap_or(1000.0).clamp(-MAX_PRICE, MAX_PRICE);
    let (min, max) = if min <= max { (min, max) } else { (max, min) };
    let price = if min == max { min } else { rng.random_range(min..max) };
    text(format!("{:.2}", price))
}

const DEPARTMENTS: &[&str] = &[
    "Books", "Clothing", "Electronics", "Garden", "Grocery", "Health", "Home", "Music", "Outdoors",
    "Sports", "Tools", "Toys",
];

fn commerce_department(_: &Value, rng: &mut StdRng) -> Value {
    text(DEPARTMENTS.choose(rng).copied().unwrap_or("Home").to_string())
}

fn lorem_word(_: &Value, rng: &mut StdRng) -> Value {
    text(Word().fake_with_rng(rng))
}

fn lorem_words(options: &Value, rng: &mut StdRng) -> Value {
    let words: Vec<String> = Words(count_range(options, 3, 3)).fake_with_rng(rng);
    text(words.join(" "))
}

fn lorem_sentence(options: &Value, rng: &mut StdRng) -> Value {
    text(Sentence(count_range(options, 4, 10)).fake_with_rng(rng))
}

fn lorem_paragraph(options: &Value, rng: &mut StdRng) -> Value {
    text(Paragraph(count_range(options, 3, 6)).fake_with_rng(rng))
}

fn phone_number(_: &Value, rng: &mut StdRng) -> Value {
    text(PhoneNumber().fake_with_rng(rng))
}

fn number_int(options: &Value, rng: &mut StdRng) -> Value {
    let (min, max) = int_range(options, 0, 1000);
    Value::from(rng.random_range(min..=max))
}

fn datatype_boolean(options: &Value, rng: &mut StdRng) -> Value {
    let p = opt_f64(options, "probability").unwrap_or(0.5).clamp(0.0, 1.0);
    Value::Bool(rng.random_bool(p))
}

fn string_uuid(_: &Value, rng: &mut StdRng) -> Value {
    let bytes: [u8; 16] = rng.random();
    text(uuid::Builder::from_random_bytes(bytes).into_uuid().to_string())
}

fn string_alphanumeric(options: &Value, rng: &mut StdRng) -> Value {
    let len = opt_i64(options, "length").unwrap_or(10).clamp(0, MAX_LENGTH) as usize;
    text((0..len).map(|_| rng.sample(Alphanumeric) as char).collect())
}

fn date_offset(rng: &mut StdRng, max_seconds: i64) -> Duration {
    Duration::seconds(rng.random_range(0..=max_seconds.max(1)))
}

const DAY: i64 = 24 * 60 * 60;

fn years(options: &Value) -> i64 {
    opt_i64(options, "years").unwrap_or(1).clamp(1, MAX_YEARS)
}

fn before_now(offset: Duration) -> Value {
    let now = Utc::now();
    text(now.checked_sub_signed(offset).unwrap_or(now).to_rfc3339())
}

fn date_past(options: &Value, rng: &mut StdRng) -> Value {
    let offset = date_offset(rng, years(options) * 365 * DAY);
    before_now(offset)
}

fn date_future(options: &Value, rng: &mut StdRng) -> Value {
    let offset = date_offset(rng, years(options) * 365 * DAY);
    let now = Utc::now();
    text(now.checked_add_signed(offset).unwrap_or(now).to_rfc3339())
}

fn date_recent(options: &Value, rng: &mut StdRng) -> Value {
    let days = opt_i64(options, "days").unwrap_or(1).clamp(1, MAX_DAYS);
    before_now(date_offset(rng, days * DAY))
}

fn image_url(options: &Value, rng: &mut StdRng) -> Value {
    let width = opt_i64(options, "width").unwrap_or(640).clamp(1, MAX_IMAGE_SIDE);
    let height = opt_i64(options, "height").unwrap_or(480).clamp(1, MAX_IMAGE_SIDE);
    let seed: u32 = rng.random();
    text(format!("https://picsum.photos/seed/{}/{}/{}", seed, width, height))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use serde_json::json;

    #[test]
    fn paths_are_unique_and_prefixed() {
        let mut seen = std::collections::HashSet::new();
        for p in paths() {
            assert!(p.starts_with(crate::config::GENERATOR_PREFIX), "{}", p);
            assert!(seen.insert(p), "duplicate generator path {}", p);
        }
        assert!(lookup("faker.person.fullName").is_some());
        assert!(lookup("faker.nope").is_none());
    }

    #[test]
    fn number_int_respects_bounds() {
        let mut rng = StdRng::seed_from_u64(7);
        let gen = lookup("faker.number.int").unwrap();
        for _ in 0..200 {
            let n = gen(&json!({"min": 5, "max": 9}), &mut rng).as_i64().unwrap();
            assert!((5..=9).contains(&n));
        }
        let n = gen(&json!({"min": 3, "max": 3}), &mut rng);
        assert_eq!(n, json!(3));
    }

    #[test]
    fn boolean_probability_extremes() {
        let mut rng = StdRng::seed_from_u64(1);
        let gen = lookup("faker.datatype.boolean").unwrap();
        assert_eq!(gen(&json!({"probability": 1.0}), &mut rng), json!(true));
        assert_eq!(gen(&json!({"probability": 0.0}), &mut rng), json!(false));
    }

    #[test]
    fn every_generator_produces_a_value() {
        let mut rng = StdRng::seed_from_u64(42);
        for p in paths() {
            let v = lookup(p).unwrap()(&json!({}), &mut rng);
            assert!(!v.is_null(), "{} produced null", p);
        }
    }

    #[test]
    fn oversized_options_are_clamped() {
        let mut rng = StdRng::seed_from_u64(11);
        let words = lorem_words(&json!({"count": i64::MAX}), &mut rng);
        assert_eq!(words.as_str().unwrap().split(' ').count(), MAX_WORDS as usize);
        let s = string_alphanumeric(&json!({"length": i64::MAX}), &mut rng);
        assert_eq!(s.as_str().unwrap().len(), MAX_LENGTH as usize);
        for path in ["faker.date.past", "faker.date.future"] {
            let v = lookup(path).unwrap()(&json!({"years": 400_000}), &mut rng);
            assert!(v.as_str().is_some(), "{} produced {}", path, v);
        }
        let v = date_recent(&json!({"days": i64::MAX}), &mut rng);
        assert!(v.as_str().is_some());
        let v = commerce_price(&json!({"min": -1e300, "max": 1e300}), &mut rng);
        assert!(v.as_str().is_some());
    }

    #[test]
    fn option_bounds_are_checked() {
        assert!(check_options("faker.date.past", &json!({"years": 5})).is_ok());
        assert!(check_options("faker.date.past", &json!({"years": 400_000})).is_err());
        assert!(check_options("faker.date.recent", &json!({"days": 0})).is_err());
        assert!(check_options("faker.lorem.words", &json!({"count": 9_223_372_036_854_775_807i64})).is_err());
        assert!(check_options("faker.lorem.sentence", &json!({"min": 2, "max": 8})).is_ok());
        assert!(check_options("faker.string.alphanumeric", &json!({"length": "long"})).is_err());
        assert!(check_options("faker.commerce.price", &json!({"max": 1e300})).is_err());
        assert!(check_options("faker.number.int", &json!({"min": i64::MIN, "max": i64::MAX})).is_ok());
        assert!(check_options("faker.person.fullName", &json!({"anything": true})).is_ok());
    }

    #[test]
    fn alphanumeric_length_and_word_count() {
        let mut rng = StdRng::seed_from_u64(3);
        let s = string_alphanumeric(&json!({"length": 12}), &mut rng);
        assert_eq!(s.as_str().unwrap().len(), 12);
        let words = lorem_words(&json!({"count": 4}), &mut rng);
        assert_eq!(words.as_str().unwrap().split(' ').count(), 4);
    }
}
