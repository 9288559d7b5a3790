//! Template engine based on MiniJinja

use crdoc_core::ApiGroup;
use minijinja::Environment;

use crate::error::{Result, TemplateError};
use crate::filters;
use crate::functions;

/// Name under which the built-in template is registered
pub const DEFAULT_TEMPLATE_NAME: &str = "default.md.j2";

/// Built-in Markdown template
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/default.md.j2");

/// Template engine builder
pub struct EngineBuilder {
    strict_mode: bool,
}

impl Default for EngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl EngineBuilder {
    pub fn new() -> Self {
        Self { strict_mode: true }
    }

    /// Set strict mode (fail on undefined variables)
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict_mode = strict;
        self
    }

    /// Build the engine
    pub fn build(self) -> Engine {
        Engine::new(self.strict_mode)
    }
}

/// The template engine
pub struct Engine {
    strict_mode: bool,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Engine {
    pub fn new(strict_mode: bool) -> Self {
        Self { strict_mode }
    }

    pub fn builder() -> EngineBuilder {
        EngineBuilder::new()
    }

    /// Create a configured MiniJinja environment
    fn create_environment(&self) -> Environment<'static> {
        let mut env = Environment::new();

        if self.strict_mode {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Strict);
        } else {
            env.set_undefined_behavior(minijinja::UndefinedBehavior::Lenient);
        }
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_filter("toyaml", filters::toyaml);
        env.add_filter("tojson", filters::tojson);
        env.add_filter("tojson_pretty", filters::tojson_pretty);
        env.add_filter("quote", filters::quote);
        env.add_filter("squote", filters::squote);
        env.add_filter("nindent", filters::nindent);
        env.add_filter("indent", filters::indent);
        env.add_filter("haskey", filters::haskey);
        env.add_filter("keys", filters::keys);
        env.add_filter("trunc", filters::trunc);
        env.add_filter("trimprefix", filters::trimprefix);
        env.add_filter("trimsuffix", filters::trimsuffix);
        env.add_filter("snakecase", filters::snakecase);
        env.add_filter("kebabcase", filters::kebabcase);
        env.add_filter("anchor", filters::anchor);

        env.add_function("fail", functions::fail);
        env.add_function("dict", functions::dict);
        env.add_function("list", functions::list);
        env.add_function("coalesce", functions::coalesce);
        env.add_function("ternary", functions::ternary);

        env
    }

    /// Render `source` against the model
    ///
    /// The whole model is available as `group`; its top-level fields are
    /// also exposed directly. The output is trimmed.
    pub fn render(&self, group: &ApiGroup, template_name: &str, source: &str) -> Result<String> {
        let model = serde_json::to_value(group)?;
        let context = serde_json::json!({
            "version": group.group_version.version,
            "api_version": group.api_version,
            "doc": model["doc"].clone(),
            "crs": model["crs"].clone(),
            "sub_objects": model["sub_objects"].clone(),
            "group": model,
        });

        let mut env = self.create_environment();
        let to_error = |e: minijinja::Error| {
            TemplateError::from_minijinja(e, template_name, source, Some(&context))
        };

        env.add_template_owned(template_name.to_string(), source.to_string())
            .map_err(to_error)?;
        let tmpl = env.get_template(template_name).map_err(to_error)?;
        let rendered = tmpl
            .render(minijinja::Value::from_serialize(&context))
            .map_err(to_error)?;

        tracing::debug!(
            template = template_name,
            bytes = rendered.len(),
            "rendered template"
        );

        Ok(rendered.trim().to_string())
    }

    /// Render the built-in Markdown template
    pub fn render_default(&self, group: &ApiGroup) -> Result<String> {
        self.render(group, DEFAULT_TEMPLATE_NAME, DEFAULT_TEMPLATE)
    }
}
