// SPDX-License-Identifier: LGPL-3.0-only
//
// This file is provided WITHOUT ANY WARRANTY;
// without even the implied warranty of MERCHANTABILITY
// or FITNESS FOR A PARTICULAR PURPOSE.

use anyhow::Result;
use std::{fs, path::Path};

/// Read a yaml file substituting `$VAR` and `${VAR}` from the environment
pub fn load_yaml_with_env(file_path: &Path) -> Result<String> {
    let content = fs::read_to_string(file_path)?;
    Ok(shellexpand::env(&content)?.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_yaml_env_substitution() {
        Jail::expect_with(|jail| {
            jail.set_env("CIPHERSTAT_TEST_THRESHOLD", "250");
            jail.set_env("CIPHERSTAT_TEST_NAME", "alpha");
            jail.create_file(
                "test.yaml",
                "name: $CIPHERSTAT_TEST_NAME\naggregation:\n  threshold: ${CIPHERSTAT_TEST_THRESHOLD}",
            )?;

            let processed =
                load_yaml_with_env(&jail.directory().join("test.yaml")).map_err(|e| e.to_string())?;

            assert!(processed.contains("name: alpha"));
            assert!(processed.contains("threshold: 250"));
            Ok(())
        });
    }

    #[test]
    fn test_missing_file_is_an_io_error() {
        let err = load_yaml_with_env(Path::new("/definitely/not/here.yaml"))
            .err()
            .and_then(|e| e.downcast::<std::io::Error>().ok());
        assert!(matches!(err, Some(e) if e.kind() == std::io::ErrorKind::NotFound));
    }
}
