//! Randomized field synthesis.
//!
//! Free functions that produce one realistic value per semantic field type
//! (usernames, IPs, hostnames, sentences, user agents, ...). Every call is
//! independent and consumes only the caller's RNG; there is no uniqueness
//! guarantee across calls.

use rand::seq::SliceRandom;
use rand::Rng;
use uuid::Uuid;

const FIRST_NAMES: &[&str] = &[
    "alice", "bob", "carol", "david", "erin", "frank", "grace", "henry", "irene", "jack", "karen",
    "liam", "maria", "nathan", "olivia", "peter", "quinn", "rachel", "sam", "tina",
];

const LAST_NAMES: &[&str] = &[
    "smith", "johnson", "williams", "brown", "jones", "garcia", "miller", "davis", "wilson",
    "moore", "taylor", "anderson", "thomas", "jackson", "white", "harris", "martin", "lee",
];

const WORDS: &[&str] = &[
    "order", "session", "account", "payment", "invoice", "report", "backup", "index", "token",
    "request", "response", "queue", "worker", "batch", "record", "profile", "catalog", "inventory",
    "shipment", "ledger", "archive", "snapshot", "metric", "audit", "config", "schema",
];

const HOST_PREFIXES: &[&str] = &["web", "app", "db", "cache", "worker", "node", "api", "proxy"];

const DOMAINS: &[&str] = &[
    "example.com",
    "example.org",
    "internal.net",
    "corp.local",
    "services.io",
];

const TLDS: &[&str] = &["com", "org", "net", "io", "dev"];

const COUNTRY_CODES: &[&str] = &[
    "US", "GB", "DE", "FR", "JP", "BR", "IN", "CA", "AU", "NL", "SE", "SG", "KR", "ES", "IT",
];

const CITIES: &[&str] = &[
    "New York",
    "London",
    "Berlin",
    "Paris",
    "Tokyo",
    "Sydney",
    "Toronto",
    "Amsterdam",
    "Singapore",
    "Stockholm",
    "Madrid",
    "Seoul",
];

const USER_AGENTS: &[&str] = &[
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.1 Safari/605.1.15",
    "Mozilla/5.0 (X11; Linux x86_64; rv:121.0) Gecko/20100101 Firefox/121.0",
    "Mozilla/5.0 (iPhone; CPU iPhone OS 17_1 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) Mobile/15E148",
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Edge/120.0.0.0",
    "curl/8.4.0",
    "python-requests/2.31.0",
];

const FILE_EXTENSIONS: &[&str] = &["log", "csv", "json", "dat", "tmp", "bak", "txt"];

const PATH_ROOTS: &[&str] = &["/var/lib", "/var/log", "/opt/data", "/home/svc", "/tmp"];

/// Pick one element from a non-empty slice.
fn pick<'a, T: ?Sized, R: Rng>(rng: &mut R, items: &'a [&'a T]) -> &'a T {
    *items.choose(rng).expect("vocabulary slices are non-empty")
}

/// A plausible lowercase username, e.g. `olivia.martin42`.
pub fn username<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}{}",
        pick(rng, FIRST_NAMES),
        pick(rng, LAST_NAMES),
        rng.gen_range(1..100)
    )
}

/// An arbitrary public-looking IPv4 address.
pub fn ipv4<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}.{}.{}",
        rng.gen_range(1..224),
        rng.gen_range(0..256),
        rng.gen_range(0..256),
        rng.gen_range(1..255)
    )
}

/// An IPv4 address mixing internal and external ranges: ~40% of results are
/// drawn from the private ranges (10.x, 192.168.x, 172.16-31.x), the rest
/// look public.
pub fn mixed_ipv4<R: Rng>(rng: &mut R) -> String {
    if rng.gen_bool(0.4) {
        match rng.gen_range(0..3) {
            0 => format!(
                "10.{}.{}.{}",
                rng.gen_range(0..256),
                rng.gen_range(0..256),
                rng.gen_range(1..255)
            ),
            1 => format!(
                "192.168.{}.{}",
                rng.gen_range(0..256),
                rng.gen_range(1..255)
            ),
            _ => format!(
                "172.{}.{}.{}",
                rng.gen_range(16..32),
                rng.gen_range(0..256),
                rng.gen_range(1..255)
            ),
        }
    } else {
        ipv4(rng)
    }
}

/// A hostname like `web-07.internal.net`.
pub fn hostname<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}-{:02}.{}",
        pick(rng, HOST_PREFIXES),
        rng.gen_range(1..40),
        pick(rng, DOMAINS)
    )
}

/// A registrable-looking domain name.
pub fn domain_name<R: Rng>(rng: &mut R) -> String {
    format!("{}{}.{}", pick(rng, WORDS), pick(rng, LAST_NAMES), pick(rng, TLDS))
}

/// A URI path with 1-3 segments.
pub fn uri_path<R: Rng>(rng: &mut R) -> String {
    let segments = rng.gen_range(1..=3);
    let mut path = String::new();
    for _ in 0..segments {
        path.push('/');
        path.push_str(pick(rng, WORDS));
    }
    // Drop the leading slash; callers join onto a base URL.
    path.split_off(1)
}

/// A UUID v4 built from RNG bytes, so seeded runs are reproducible.
pub fn uuid_v4<R: Rng>(rng: &mut R) -> Uuid {
    let mut bytes = [0u8; 16];
    rng.fill(&mut bytes);

    // Set version (4) and variant (RFC 4122) bits
    bytes[6] = (bytes[6] & 0x0f) | 0x40;
    bytes[8] = (bytes[8] & 0x3f) | 0x80;

    Uuid::from_bytes(bytes)
}

/// A lowercase hex string of the given length.
pub fn hex_string<R: Rng>(rng: &mut R, len: usize) -> String {
    const HEX: &[u8] = b"0123456789abcdef";
    (0..len)
        .map(|_| HEX[rng.gen_range(0..16)] as char)
        .collect()
}

/// A 16-character span identifier.
pub fn span_id<R: Rng>(rng: &mut R) -> String {
    hex_string(rng, 16)
}

/// A SHA-256-shaped hex digest.
pub fn sha256_hex<R: Rng>(rng: &mut R) -> String {
    hex_string(rng, 64)
}

/// One word from a fixed vocabulary.
pub fn word<R: Rng>(rng: &mut R) -> String {
    pick(rng, WORDS).to_string()
}

/// A free-text sentence of 4-8 vocabulary words.
pub fn sentence<R: Rng>(rng: &mut R) -> String {
    let len = rng.gen_range(4..=8);
    let words: Vec<&str> = (0..len).map(|_| pick(rng, WORDS)).collect();
    let mut s = words.join(" ");
    if let Some(head) = s.get_mut(0..1) {
        head.make_ascii_uppercase();
    }
    s.push('.');
    s
}

/// A file name like `backup_4821.log`.
pub fn file_name<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}_{}.{}",
        pick(rng, WORDS),
        rng.gen_range(1000..10000),
        pick(rng, FILE_EXTENSIONS)
    )
}

/// An absolute file path.
pub fn file_path<R: Rng>(rng: &mut R) -> String {
    format!("{}/{}/{}", pick(rng, PATH_ROOTS), pick(rng, WORDS), file_name(rng))
}

/// An email address.
pub fn email<R: Rng>(rng: &mut R) -> String {
    format!(
        "{}.{}@{}",
        pick(rng, FIRST_NAMES),
        pick(rng, LAST_NAMES),
        pick(rng, DOMAINS)
    )
}

/// A North-American-looking phone number.
pub fn phone_number<R: Rng>(rng: &mut R) -> String {
    format!(
        "+1-{}-555-{:04}",
        rng.gen_range(200..1000),
        rng.gen_range(0..10000)
    )
}

/// A browser or client user-agent string.
pub fn user_agent<R: Rng>(rng: &mut R) -> String {
    pick(rng, USER_AGENTS).to_string()
}

/// A two-letter country code.
pub fn country_code<R: Rng>(rng: &mut R) -> String {
    pick(rng, COUNTRY_CODES).to_string()
}

/// A city name.
pub fn city<R: Rng>(rng: &mut R) -> String {
    pick(rng, CITIES).to_string()
}

/// A semver-like version string with the given major range, e.g. `2.4.1`.
pub fn version<R: Rng>(rng: &mut R, max_major: u32) -> String {
    format!(
        "{}.{}.{}",
        rng.gen_range(1..=max_major),
        rng.gen_range(0..10),
        rng.gen_range(0..10)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::net::Ipv4Addr;

    #[test]
    fn test_ipv4_parses() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..100 {
            let ip = ipv4(&mut rng);
            assert!(ip.parse::<Ipv4Addr>().is_ok(), "invalid IPv4: {ip}");
        }
    }

    #[test]
    fn test_mixed_ipv4_private_ratio() {
        let mut rng = StdRng::seed_from_u64(42);
        let mut private = 0usize;
        let trials = 10_000;

        for _ in 0..trials {
            let ip: Ipv4Addr = mixed_ipv4(&mut rng).parse().unwrap();
            if ip.is_private() {
                private += 1;
            }
        }

        // ~40% private, with slack for public draws that happen to land in a
        // private range.
        let ratio = private as f64 / trials as f64;
        assert!((0.35..=0.50).contains(&ratio), "private ratio {ratio}");
    }

    #[test]
    fn test_uuid_v4_version_and_determinism() {
        let mut rng1 = StdRng::seed_from_u64(7);
        let mut rng2 = StdRng::seed_from_u64(7);

        let a = uuid_v4(&mut rng1);
        let b = uuid_v4(&mut rng2);
        assert_eq!(a, b);
        assert_eq!(a.get_version_num(), 4);
    }

    #[test]
    fn test_span_id_is_hex() {
        let mut rng = StdRng::seed_from_u64(42);
        let id = span_id(&mut rng);
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_sentence_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..20 {
            let s = sentence(&mut rng);
            assert!(s.ends_with('.'));
            assert!(s.chars().next().unwrap().is_ascii_uppercase());
        }
    }

    #[test]
    fn test_email_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let e = email(&mut rng);
        assert!(e.contains('@'));
        assert!(e.contains('.'));
    }

    #[test]
    fn test_version_major_range() {
        let mut rng = StdRng::seed_from_u64(42);
        for _ in 0..50 {
            let v = version(&mut rng, 3);
            let major: u32 = v.split('.').next().unwrap().parse().unwrap();
            assert!((1..=3).contains(&major));
        }
    }
}
