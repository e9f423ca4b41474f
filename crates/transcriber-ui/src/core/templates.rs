//! Precompiled view templates.
//!
//! # Design
//! - The five view templates are fetched once at startup and compiled into a
//!   single immutable registry; nothing is registered afterwards.
//! - [`TemplateSources`] has one field per view so a partial set cannot exist.
//! - Templates may use the `ifeq` block helper for loose equality checks and
//!   `json` to print structured values.

use handlebars::{
    Context, Handlebars, Helper, HelperDef, HelperResult, Output, RenderContext, Renderable,
    html_escape,
};
use serde::Serialize;
use serde_json::Value;
use std::fmt;
use thiserror::Error;

/// Named views rendered by the console.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ViewName {
    /// Landing page.
    Home,
    /// Video list grouped by status.
    Videos,
    /// Single video detail and caption editor.
    Video,
    /// Tweaks editor.
    Tweaks,
    /// Custom vocabulary editor.
    Vocabulary,
}

impl ViewName {
    /// Every view, in startup load order.
    pub const ALL: [Self; 5] = [
        Self::Home,
        Self::Videos,
        Self::Video,
        Self::Tweaks,
        Self::Vocabulary,
    ];

    /// Registry key for the view.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Videos => "videos",
            Self::Video => "video",
            Self::Tweaks => "tweaks",
            Self::Vocabulary => "vocabulary",
        }
    }

    /// Location of the template document relative to the site root.
    #[must_use]
    pub fn template_path(self) -> String {
        format!("templates/{}.hbs", self.as_str())
    }
}

impl fmt::Display for ViewName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw template markup for every view.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TemplateSources {
    /// Home template.
    pub home: String,
    /// Videos template.
    pub videos: String,
    /// Video template.
    pub video: String,
    /// Tweaks template.
    pub tweaks: String,
    /// Vocabulary template.
    pub vocabulary: String,
}

impl TemplateSources {
    fn source(&self, view: ViewName) -> &str {
        match view {
            ViewName::Home => &self.home,
            ViewName::Videos => &self.videos,
            ViewName::Video => &self.video,
            ViewName::Tweaks => &self.tweaks,
            ViewName::Vocabulary => &self.vocabulary,
        }
    }
}

/// Template compilation and rendering failures.
#[derive(Debug, Error)]
pub enum TemplateError {
    /// Markup did not compile.
    #[error("template '{view}' failed to compile")]
    Compile {
        /// View whose template failed.
        view: ViewName,
        /// Compiler error.
        #[source]
        source: Box<handlebars::TemplateError>,
    },
    /// Rendering with the supplied data failed.
    #[error("template '{view}' failed to render")]
    Render {
        /// View being rendered.
        view: ViewName,
        /// Renderer error.
        #[source]
        source: Box<handlebars::RenderError>,
    },
}

/// Compiled, immutable set of view templates.
#[derive(Debug)]
pub struct TemplateCache {
    registry: Handlebars<'static>,
}

impl TemplateCache {
    /// Compile every view template.
    ///
    /// # Errors
    /// Returns [`TemplateError::Compile`] for the first template that fails.
    pub fn compile(sources: &TemplateSources) -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.register_helper("ifeq", Box::new(IfEq));
        registry.register_helper("json", Box::new(Json));
        for view in ViewName::ALL {
            registry
                .register_template_string(view.as_str(), sources.source(view))
                .map_err(|source| TemplateError::Compile {
                    view,
                    source: Box::new(source),
                })?;
        }
        Ok(Self { registry })
    }

    /// Render `view` with `data`.
    ///
    /// # Errors
    /// Returns [`TemplateError::Render`] when the template rejects the data.
    pub fn render<T: Serialize>(&self, view: ViewName, data: &T) -> Result<String, TemplateError> {
        self.registry
            .render(view.as_str(), data)
            .map_err(|source| TemplateError::Render {
                view,
                source: Box::new(source),
            })
    }
}

/// `{{#ifeq a b}}...{{else}}...{{/ifeq}}` with loose string/number equality.
struct IfEq;

impl HelperDef for IfEq {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        r: &'reg Handlebars<'reg>,
        ctx: &'rc Context,
        rc: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let left = h.param(0).map_or(&Value::Null, |param| param.value());
        let right = h.param(1).map_or(&Value::Null, |param| param.value());
        let branch = if loosely_equal(left, right) {
            h.template()
        } else {
            h.inverse()
        };
        match branch {
            Some(template) => template.render(r, ctx, rc, out),
            None => Ok(()),
        }
    }
}

/// `{{json value}}`: strings verbatim, other values pretty-printed, escaped.
struct Json;

impl HelperDef for Json {
    fn call<'reg: 'rc, 'rc>(
        &self,
        h: &Helper<'rc>,
        _: &'reg Handlebars<'reg>,
        _: &'rc Context,
        _: &mut RenderContext<'reg, 'rc>,
        out: &mut dyn Output,
    ) -> HelperResult {
        let text = match h.param(0).map(|param| param.value()) {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => serde_json::to_string_pretty(other).unwrap_or_default(),
        };
        out.write(&html_escape(&text))?;
        Ok(())
    }
}

fn loosely_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => a.as_f64() == b.as_f64(),
        (Value::String(text), Value::Number(number))
        | (Value::Number(number), Value::String(text)) => {
            text.trim().parse::<f64>().ok() == number.as_f64()
        }
        _ => left == right,
    }
}

#[cfg(test)]
pub(crate) fn sample_sources() -> TemplateSources {
    TemplateSources {
        home: "<h1>home</h1>{{#if loggedIn}}<p>signed-in</p>{{/if}}".to_string(),
        videos: concat!(
            "{{#if loading}}<p>loading</p>{{else}}",
            "<p>errored:{{#each erroredVideos}}{{id}},{{/each}}</p>",
            "<p>processing:{{#each processingVideos}}{{id}},{{/each}}</p>",
            "<p>ready:{{#each readyVideos}}{{id}}@{{formattedDate}},{{/each}}</p>",
            "<p>complete:{{#each completedVideos}}{{id}},{{/each}}</p>",
            "{{/if}}<a href=\"{{refreshLink}}\">refresh</a>"
        )
        .to_string(),
        video: "{{#if loading}}<p>loading {{videoId}}</p>{{else}}<p>{{videoId}}:{{video.name}}</p>{{/if}}"
            .to_string(),
        tweaks: "{{#if loading}}<p>loading</p>{{else}}<p>{{#each tweaks}}{{this}};{{/each}}</p>{{/if}}"
            .to_string(),
        vocabulary: "{{#if loading}}<p>loading</p>{{else}}<p>{{#each vocabulary}}{{this}};{{/each}}</p>{{/if}}"
            .to_string(),
    }
}
