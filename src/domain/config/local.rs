use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
pub enum Provider {
    #[default]
    #[serde(rename = "cloudinary")]
    Cloudinary,
    #[serde(rename = "supabase")]
    Supabase,
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Provider::Cloudinary => f.write_str("cloudinary"),
            Provider::Supabase => f.write_str("supabase"),
        }
    }
}

impl FromStr for Provider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cloudinary" => Ok(Provider::Cloudinary),
            "supabase" => Ok(Provider::Supabase),
            other => Err(format!("unknown storage provider '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_provider_names_case_insensitively() {
        assert_eq!("Cloudinary".parse::<Provider>(), Ok(Provider::Cloudinary));
        assert_eq!(" supabase ".parse::<Provider>(), Ok(Provider::Supabase));
        assert!("gdrive".parse::<Provider>().is_err());
    }
}
