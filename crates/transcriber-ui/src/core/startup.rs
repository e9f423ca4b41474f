//! Startup sequencing.
//!
//! # Design
//! - The site configuration and the five view templates load concurrently.
//! - The join is all-or-nothing: one failed load fails startup and nothing
//!   is compiled, so no route can ever be armed with a partial template set.

use crate::core::config::{ConfigError, SiteConfig};
use crate::core::templates::{TemplateCache, TemplateError, TemplateSources, ViewName};
use async_trait::async_trait;
use thiserror::Error;

/// Location of the site configuration relative to the site root.
pub const SITE_CONFIG_PATH: &str = "site_config.json";

/// A static document could not be fetched.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("failed to load '{path}': {message}")]
pub struct LoadError {
    /// Requested path.
    pub path: String,
    /// Failure reason.
    pub message: String,
}

/// Static document fetcher.
#[async_trait(?Send)]
pub trait DocumentLoader {
    /// Fetch the text of `path`.
    async fn load(&self, path: &str) -> Result<String, LoadError>;
}

/// Fatal startup failures.
#[derive(Debug, Error)]
pub enum StartupError {
    /// A document failed to load.
    #[error(transparent)]
    Load(#[from] LoadError),
    /// Configuration did not parse or validate.
    #[error("site configuration rejected")]
    Config(#[from] ConfigError),
    /// A template did not compile.
    #[error("view templates rejected")]
    Templates(#[from] TemplateError),
}

/// Everything routing needs before it can be armed.
#[derive(Debug)]
pub struct Bootstrap {
    /// Validated site configuration.
    pub config: SiteConfig,
    /// Compiled view templates.
    pub templates: TemplateCache,
}

/// Load and compile the configuration and every template.
///
/// # Errors
/// Returns [`StartupError`] if any load, parse, or compile step fails.
pub async fn bootstrap(loader: &dyn DocumentLoader) -> Result<Bootstrap, StartupError> {
    let paths = ViewName::ALL.map(ViewName::template_path);
    let [home, videos, video, tweaks, vocabulary] = &paths;
    let (config, home, videos, video, tweaks, vocabulary) = futures_util::try_join!(
        loader.load(SITE_CONFIG_PATH),
        loader.load(home),
        loader.load(videos),
        loader.load(video),
        loader.load(tweaks),
        loader.load(vocabulary),
    )?;

    let config = SiteConfig::from_json(&config)?;
    tracing::info!(
        version = config.version.as_deref().unwrap_or("unknown"),
        "loaded site configuration"
    );
    let templates = TemplateCache::compile(&TemplateSources {
        home,
        videos,
        video,
        tweaks,
        vocabulary,
    })?;
    Ok(Bootstrap { config, templates })
}
