// Random test data for login and password scenarios

use rand::Rng;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;

const FIRST_NAMES: &[&str] = &[
    "Ada", "Bruno", "Carmen", "Dmitri", "Elena", "Farid", "Greta", "Hugo", "Ines", "Jonas",
    "Kaori", "Lucia", "Mateo", "Nadia", "Oscar", "Priya",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Prefix that guarantees a letter and a digit.
pub const REQUIRED_PASSWORD_PREFIX: &str = "A1";

/// A first name from a fixed pool.
pub fn random_first_name() -> String {
    pick(FIRST_NAMES).to_string()
}

/// Username such as `carmen_x7k2pq42`: a lowercase first name, `_`, six
/// alphanumerics and two digits. Never registered on the demo.
pub fn random_username() -> String {
    let mut rng = rand::thread_rng();
    format!(
        "{}_{}{}",
        pick(FIRST_NAMES).to_lowercase(),
        alphanumeric(&mut rng, 6).to_lowercase(),
        rng.gen_range(10..100)
    )
}

/// Username truncated (or padded) to exactly `len` characters.
pub fn username_with_len(len: usize) -> String {
    let mut name = random_username();
    if name.len() < len {
        let mut rng = rand::thread_rng();
        name.push_str(&alphanumeric(&mut rng, len - name.len()).to_lowercase());
    }
    name.truncate(len);
    name
}

/// Alphanumeric password of `len` characters. May lack a digit or a letter.
pub fn random_password(len: usize) -> String {
    alphanumeric(&mut rand::thread_rng(), len)
}

/// Password of `len` characters (at least 2) with at least one letter and one digit.
pub fn password_with_requirements(len: usize) -> String {
    let tail = len.saturating_sub(REQUIRED_PASSWORD_PREFIX.len());
    format!("{REQUIRED_PASSWORD_PREFIX}{}", random_password(tail))
}

pub fn random_email() -> String {
    format!("{}@{}", random_username(), pick(EMAIL_DOMAINS))
}

fn alphanumeric<R: Rng>(rng: &mut R, len: usize) -> String {
    rng.sample_iter(&Alphanumeric)
        .take(len)
        .map(char::from)
        .collect()
}

fn pick(pool: &'static [&'static str]) -> &'static str {
    pool.choose(&mut rand::thread_rng()).copied().unwrap_or("user")
}
