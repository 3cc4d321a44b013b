//! Random server identity generation.
//!
//! Produces the FTP credential pair and the candidate game port for a new
//! server record. Generation is pure randomness with no store lookup; the
//! schema's unique constraints catch collisions and the provisioning engine
//! regenerates within a bounded retry budget.

use std::ops::RangeInclusive;

use rand::Rng;

const LOWERCASE_ALNUM: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const MIXED_ALNUM: &[u8] =
    b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

const USERNAME_SUFFIX_LEN: usize = 8;
const PASSWORD_LEN: usize = 16;

/// Tunables for identity generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentitySettings {
    /// Prefix prepended to every generated FTP username.
    pub username_prefix: String,
    /// Reserved game port range, inclusive.
    pub port_range: RangeInclusive<u16>,
    /// How many collisions to tolerate before giving up on provisioning.
    pub max_attempts: u32,
}

impl Default for IdentitySettings {
    fn default() -> Self {
        Self {
            username_prefix: "samp_".to_owned(),
            port_range: 7777..=8777,
            max_attempts: 5,
        }
    }
}

/// Generated identity of one server record: port plus FTP credentials.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerIdentity {
    /// Candidate game port.
    pub port: u16,
    /// Generated FTP account name.
    pub ftp_username: String,
    /// Generated FTP account password.
    pub ftp_password: String,
}

impl ServerIdentity {
    /// Draw a fresh identity from the given randomness source.
    ///
    /// The username is the configured prefix followed by eight lowercase
    /// alphanumerics; the password is sixteen mixed-case alphanumerics; the
    /// port is drawn uniformly from the configured range. No uniqueness check
    /// happens here.
    pub fn generate<R: Rng + ?Sized>(settings: &IdentitySettings, rng: &mut R) -> Self {
        let mut ftp_username = settings.username_prefix.clone();
        ftp_username.extend(sample_chars(rng, LOWERCASE_ALNUM, USERNAME_SUFFIX_LEN));

        Self {
            port: rng.gen_range(settings.port_range.clone()),
            ftp_username,
            ftp_password: sample_chars(rng, MIXED_ALNUM, PASSWORD_LEN).collect(),
        }
    }
}

fn sample_chars<'a, R: Rng + ?Sized>(
    rng: &'a mut R,
    charset: &'a [u8],
    count: usize,
) -> impl Iterator<Item = char> + 'a {
    (0..count).map(move |_| {
        let index = rng.gen_range(0..charset.len());
        char::from(charset[index])
    })
}
