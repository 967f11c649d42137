//! Type system configuration

use crate::{TypeError, TypeResult};
use serde::{Deserialize, Serialize};

/// Defaults and limits applied by [`crate::SqlTypeFactory`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeSystemConfig {
    /// Character set given to character types created without one
    pub default_charset: String,
    /// Collation given to character types created without one
    pub default_collation: String,
    /// Precision of CHAR/VARCHAR/BINARY/VARBINARY when none is specified
    pub default_char_precision: u32,
    /// Precision of DECIMAL when none is specified
    pub default_decimal_precision: u32,
    /// Scale of DECIMAL when none is specified
    pub default_decimal_scale: u32,
    /// Upper bound on the precision of derived exact numeric types
    pub max_numeric_precision: u32,
}

impl Default for TypeSystemConfig {
    fn default() -> Self {
        Self {
            default_charset: "ISO-8859-1".to_string(),
            default_collation: "ISO-8859-1$en_US$primary".to_string(),
            default_char_precision: 1,
            default_decimal_precision: 19,
            default_decimal_scale: 0,
            max_numeric_precision: 19,
        }
    }
}

impl TypeSystemConfig {
    /// Load a configuration from JSON; missing keys take their defaults
    pub fn from_json(json: &str) -> TypeResult<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| TypeError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check the limits are mutually consistent
    pub fn validate(&self) -> TypeResult<()> {
        if self.default_decimal_scale > self.default_decimal_precision {
            return Err(TypeError::InvalidConfig(format!(
                "default_decimal_scale {} exceeds default_decimal_precision {}",
                self.default_decimal_scale, self.default_decimal_precision
            )));
        }
        if self.default_decimal_precision > self.max_numeric_precision {
            return Err(TypeError::InvalidConfig(format!(
                "default_decimal_precision {} exceeds max_numeric_precision {}",
                self.default_decimal_precision, self.max_numeric_precision
            )));
        }
        if self.default_char_precision == 0 {
            return Err(TypeError::InvalidConfig(
                "default_char_precision must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = TypeSystemConfig::from_json(r#"{ "max_numeric_precision": 38 }"#).unwrap();
        assert_eq!(config.max_numeric_precision, 38);
        assert_eq!(config.default_charset, "ISO-8859-1");
        assert_eq!(config.default_decimal_precision, 19);
    }

    #[test]
    fn test_inconsistent_limits_rejected() {
        let result = TypeSystemConfig::from_json(
            r#"{ "default_decimal_precision": 30, "max_numeric_precision": 19 }"#,
        );
        assert!(matches!(result, Err(TypeError::InvalidConfig(_))));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(TypeSystemConfig::from_json("{ not json").is_err());
    }
}
