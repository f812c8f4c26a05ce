use std::fs;
use std::path::{
  Path,
  PathBuf
};
use std::time::Duration;

use anyhow::{
  Context,
  anyhow
};
use mission_core::DEFAULT_IMAGE_ENDPOINT;
use serde::Deserialize;
use tracing::{
  debug,
  info
};

#[derive(
  Debug,
  Clone,
  Default,
  PartialEq,
  Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
  pub data_dir:    Option<PathBuf>,
  pub image:       ImageConfig,
  #[serde(skip)]
  pub loaded_file: Option<PathBuf>
}

#[derive(
  Debug, Clone, PartialEq, Deserialize,
)]
#[serde(default, deny_unknown_fields)]
pub struct ImageConfig {
  pub enabled:      bool,
  pub endpoint:     String,
  pub timeout_secs: u64
}

impl Default for ImageConfig {
  fn default() -> Self {
    Self {
      enabled:      true,
      endpoint:     DEFAULT_IMAGE_ENDPOINT
        .to_string(),
      timeout_secs: 10
    }
  }
}

impl ImageConfig {
  pub fn timeout(&self) -> Duration {
    Duration::from_secs(
      self.timeout_secs.max(1)
    )
  }
}

impl Config {
  #[tracing::instrument(skip(
    config_override
  ))]
  pub fn load(
    config_override: Option<&Path>
  ) -> anyhow::Result<Self> {
    let Some(path) = resolve_config_path(
      config_override
    ) else {
      debug!(
        "no config file; using \
         defaults"
      );
      return Ok(Self::default());
    };

    let path = expand_tilde(&path);
    info!(config = %path.display(), "loading config");
    let text =
      fs::read_to_string(&path)
        .with_context(|| {
          format!(
            "failed to read {}",
            path.display()
          )
        })?;

    let mut cfg = Self::from_toml_str(
      &text
    )
    .with_context(|| {
      format!(
        "invalid config {}",
        path.display()
      )
    })?;
    cfg.loaded_file = Some(path);
    Ok(cfg)
  }

  pub fn from_toml_str(
    text: &str
  ) -> anyhow::Result<Self> {
    let cfg: Config = toml::from_str(text)?;
    Ok(cfg)
  }

  /// Applies `key=value` overrides on top of the loaded file.
  #[tracing::instrument(skip(
    self, overrides
  ))]
  pub fn apply_overrides<I>(
    &mut self,
    overrides: I
  ) -> anyhow::Result<()>
  where
    I: IntoIterator<
      Item = (String, String)
    >
  {
    for (key, value) in overrides {
      debug!(key = %key, value = %value, "applying override");
      match key.as_str() {
        | "data_dir" => {
          self.data_dir =
            Some(PathBuf::from(value));
        }
        | "image.enabled" => {
          self.image.enabled =
            parse_bool(&value)
              .ok_or_else(|| {
                anyhow!(
                  "image.enabled \
                   expects a boolean, \
                   got: {value}"
                )
              })?;
        }
        | "image.endpoint" => {
          self.image.endpoint = value;
        }
        | "image.timeout_secs" => {
          self.image.timeout_secs =
            value.parse().with_context(
              || {
                format!(
                  "image.timeout_secs \
                   expects seconds, \
                   got: {value}"
                )
              }
            )?;
        }
        | other => {
          return Err(anyhow!(
            "unknown config key: \
             {other}"
          ));
        }
      }
    }
    Ok(())
  }
}

#[tracing::instrument(skip(
  cfg,
  override_dir
))]
pub fn resolve_data_dir(
  cfg: &Config,
  override_dir: Option<&Path>
) -> anyhow::Result<PathBuf> {
  let dir = if let Some(path) =
    override_dir
  {
    path.to_path_buf()
  } else if let Some(path) =
    &cfg.data_dir
  {
    expand_tilde(path)
  } else {
    default_data_dir()?
  };

  if !dir.exists() {
    info!(dir = %dir.display(), "creating data directory");
    fs::create_dir_all(&dir)
      .with_context(|| {
        format!(
          "failed to create {}",
          dir.display()
        )
      })?;
  }

  Ok(dir)
}

fn resolve_config_path(
  override_path: Option<&Path>
) -> Option<PathBuf> {
  if let Some(path) = override_path {
    return Some(path.to_path_buf());
  }

  if let Ok(env_path) =
    std::env::var("MISSION_CONFIG")
  {
    if env_path == "/dev/null"
      || env_path.trim().is_empty()
    {
      return None;
    }
    return Some(PathBuf::from(
      env_path
    ));
  }

  let candidate = dirs::config_dir()?
    .join("mission")
    .join("config.toml");
  candidate.exists().then_some(candidate)
}

fn default_data_dir()
-> anyhow::Result<PathBuf> {
  let base = dirs::data_dir()
    .ok_or_else(|| {
      anyhow!(
        "cannot determine data \
         directory"
      )
    })?;
  Ok(base.join("mission"))
}

fn expand_tilde(
  path: &Path
) -> PathBuf {
  let text = path.to_string_lossy();
  if let Some(rest) =
    text.strip_prefix("~/")
    && let Some(home) = dirs::home_dir()
  {
    return home.join(rest);
  }
  path.to_path_buf()
}

fn parse_bool(s: &str) -> Option<bool> {
  match s
    .trim()
    .to_ascii_lowercase()
    .as_str()
  {
    | "1" | "y" | "yes" | "on"
    | "true" => Some(true),
    | "0" | "n" | "no" | "off"
    | "false" => Some(false),
    | _ => None
  }
}
