use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use log::debug;
use nsfetch_core::{Error, Result};
use nsfetch_netsuite::Config;

/// Write `config` as pretty printed JSON to `path`, readable by the owner only.
pub fn write_config(path: impl AsRef<Path>, config: &Config) -> Result<()> {
    let path = path.as_ref();
    let content = config.to_json_pretty()?;

    let mut opts = OpenOptions::new();
    opts.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        opts.mode(0o600);
    }

    let mut file = opts.open(path).map_err(|e| {
        Error::config_invalid(format!("failed to open config file {}", path.display()))
            .with_source(e)
    })?;
    // mode only applies on creation.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(std::fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(content.as_bytes())?;

    debug!("config written to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use nsfetch_netsuite::Credential;
    use pretty_assertions::assert_eq;
    use serde_json::{json, Value};

    #[test]
    fn test_write_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".nsfetch-config.json");
        std::fs::write(&path, "stale content that is longer than the config itself ".repeat(20))
            .unwrap();

        let config = Config::from(Credential::new("ck", "cs", "tk", "ts", "1234567_SB1"));
        write_config(&path, &config).expect("config must be written");

        let content: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(
            content,
            json!({
                "consumerKey": "ck",
                "consumerSecret": "cs",
                "token": "tk",
                "tokenSecret": "ts",
                "realm": "1234567_SB1",
            })
        );

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = std::fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }
    }
}
