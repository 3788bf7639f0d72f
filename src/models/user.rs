use serde::Serialize;

pub const USER_PREFIX: &str = "user:";

/// Hash fields of a user record, in the order they appear on a source line.
pub const USER_FIELDS: [&str; 11] = [
    "first_name",
    "last_name",
    "email",
    "gender",
    "ip_address",
    "country",
    "country_code",
    "city",
    "longitude",
    "latitude",
    "last_login",
];

/// Lines with fewer tokens than this are not user records.
pub const MIN_USER_TOKENS: usize = 22;

/// Builds the hash key for a user id. Values that already carry the prefix
/// (the source files store full keys) are kept as they are.
pub fn user_key(id: &str) -> String {
    if id.starts_with(USER_PREFIX) {
        id.to_string()
    } else {
        format!("{}{}", USER_PREFIX, id)
    }
}

/// Id part of a `user:<id>` key (everything after the first `:`).
pub fn user_id_from_key(key: &str) -> &str {
    key.split_once(':').map(|(_, id)| id).unwrap_or("")
}

/// User hash record (stored under `user:<id>`)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRecord {
    pub key: String,
    pub fields: Vec<(&'static str, String)>,
}

impl UserRecord {
    /// Builds a record from a tokenized line laid out as
    /// `<key> first_name <v> last_name <v> ... last_login <v>`.
    ///
    /// Values sit at the even positions 2, 4, ..., 20. `last_login` is read
    /// from position 22 when the line has it and from 21 otherwise.
    pub fn from_tokens(tokens: &[String]) -> Option<Self> {
        if tokens.len() < MIN_USER_TOKENS {
            return None;
        }

        let last = USER_FIELDS.len() - 1;
        let fields = USER_FIELDS
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let position = if i == last {
                    if tokens.len() > 22 { 22 } else { 21 }
                } else {
                    2 * (i + 1)
                };
                (*name, tokens[position].clone())
            })
            .collect();

        Some(Self {
            key: user_key(&tokens[0]),
            fields,
        })
    }

    #[cfg(test)]
    pub fn get(&self, field: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, value)| value.as_str())
    }
}

/// Result of the coordinate lookup
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Coordinates {
    pub longitude: String,
    pub latitude: String,
}
