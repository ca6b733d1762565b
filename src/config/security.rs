use crate::errors::PrivacyError;

/// Rejected anywhere inside a value.
const DANGEROUS_PATTERNS: &[&str] = &["../", "..\\", "<script"];

/// URI schemes, rejected only where a value starts with them.
const DANGEROUS_SCHEMES: &[&str] = &["javascript:", "data:", "file:", "vbscript:"];

/// Characters that would split one header value into several headers.
const HEADER_BREAKS: &[char] = &['\r', '\n', '\0'];

pub fn validate_security_patterns(value: &serde_yaml::Value) -> Result<(), PrivacyError> {
    check_value(value, &[])
}

fn check_value(value: &serde_yaml::Value, path: &[String]) -> Result<(), PrivacyError> {
    match value {
        serde_yaml::Value::String(s) => {
            let path_str = || if path.is_empty() { "root".to_string() } else { path.join(".") };
            if s.contains(HEADER_BREAKS) {
                return Err(PrivacyError::Config(format!(
                    "Line break or NUL character found at config path: {}",
                    path_str()
                )));
            }
            let lower = s.trim_start().to_lowercase();
            let hit = DANGEROUS_PATTERNS
                .iter()
                .find(|p| lower.contains(*p))
                .or_else(|| DANGEROUS_SCHEMES.iter().find(|p| lower.starts_with(*p)));
            match hit {
                Some(pattern) => Err(PrivacyError::Config(format!(
                    "Dangerous pattern '{}' found at config path: {}",
                    pattern,
                    path_str()
                ))),
                None => Ok(()),
            }
        }
        serde_yaml::Value::Mapping(map) => {
            for (k, v) in map {
                let key = k.as_str().unwrap_or("unknown").to_string();
                let mut new_path = path.to_vec();
                new_path.push(key);
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        serde_yaml::Value::Sequence(seq) => {
            for (i, v) in seq.iter().enumerate() {
                let mut new_path = path.to_vec();
                new_path.push(format!("[{}]", i));
                check_value(v, &new_path)?;
            }
            Ok(())
        }
        _ => Ok(()),
    }
}
