//! Renderer lookup by plot kind and backend name.

use std::collections::BTreeMap;
use std::fmt;

use bf_common::{Error, Result};
use bf_render::Axes;
use tracing::debug;

use super::backends::{HtmlBackend, SvgBackend};
use super::options::PlotOptions;
use super::PLOT_KIND;

/// A backend-specific drawing routine for one plot kind.
pub trait Renderer: Send + Sync {
    /// Backend name this renderer is registered under.
    fn backend(&self) -> &str;

    /// Draw the figure and return its handle.
    fn draw(&self, options: &PlotOptions) -> Result<Axes>;
}

/// Immutable after construction; lookups borrow.
pub struct RendererRegistry {
    renderers: BTreeMap<(String, String), Box<dyn Renderer>>,
}

impl RendererRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            renderers: BTreeMap::new(),
        }
    }

    /// Registry with the `svg` and `html` Bayes factor renderers.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register(PLOT_KIND, Box::new(SvgBackend));
        registry.register(PLOT_KIND, Box::new(HtmlBackend));
        registry
    }

    /// Add or replace the renderer for `(plot_kind, renderer.backend())`.
    pub fn register(&mut self, plot_kind: &str, renderer: Box<dyn Renderer>) {
        let key = (plot_kind.to_string(), renderer.backend().to_ascii_lowercase());
        self.renderers.insert(key, renderer);
    }

    /// Find the renderer for `plot_kind` on `backend`.
    ///
    /// Backend names are matched case-insensitively. Unknown names fail with
    /// `UnsupportedBackend` listing what is available.
    pub fn resolve(&self, plot_kind: &str, submodule: &str, backend: &str) -> Result<&dyn Renderer> {
        let name = backend.trim().to_ascii_lowercase();
        match self.renderers.get(&(plot_kind.to_string(), name)) {
            Some(renderer) => {
                debug!(plot_kind, submodule, backend = %renderer.backend(), "resolved renderer");
                Ok(renderer.as_ref())
            }
            None => Err(Error::UnsupportedBackend {
                backend: backend.to_string(),
                plot_kind: plot_kind.to_string(),
                available: self.backends(plot_kind).join(", "),
            }),
        }
    }

    /// Backend names registered for `plot_kind`, sorted.
    pub fn backends(&self, plot_kind: &str) -> Vec<&str> {
        self.renderers
            .keys()
            .filter(|(kind, _)| kind == plot_kind)
            .map(|(_, backend)| backend.as_str())
            .collect()
    }
}

impl Default for RendererRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

impl fmt::Debug for RendererRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.renderers.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::SUBMODULE;

    struct Fixed;

    impl Renderer for Fixed {
        fn backend(&self) -> &str {
            "Fixed"
        }

        fn draw(&self, _options: &PlotOptions) -> Result<Axes> {
            Ok(Axes::new("fixed", (1.0, 1.0), 10.0)?)
        }
    }

    #[test]
    fn builtins_are_listed_sorted() {
        let registry = RendererRegistry::with_builtins();
        assert_eq!(registry.backends(PLOT_KIND), ["html", "svg"]);
        assert!(registry.backends("plot_forest").is_empty());
    }

    #[test]
    fn resolve_is_case_insensitive() {
        let registry = RendererRegistry::with_builtins();
        assert_eq!(registry.resolve(PLOT_KIND, SUBMODULE, "SVG").unwrap().backend(), "svg");
    }

    #[test]
    fn unknown_backend_fails_closed() {
        let registry = RendererRegistry::with_builtins();
        let err = registry
            .resolve(PLOT_KIND, SUBMODULE, "matplotlib")
            .err()
            .unwrap();
        match err {
            Error::UnsupportedBackend {
                backend, available, ..
            } => {
                assert_eq!(backend, "matplotlib");
                assert_eq!(available, "html, svg");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn custom_renderers_can_be_registered() {
        let mut registry = RendererRegistry::new();
        registry.register(PLOT_KIND, Box::new(Fixed));
        assert_eq!(registry.backends(PLOT_KIND), ["fixed"]);
        assert!(registry.resolve(PLOT_KIND, SUBMODULE, "fixed").is_ok());
        assert!(format!("{registry:?}").contains("fixed"));
    }
}
