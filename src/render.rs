//! Expand the fixed models template.
//!
//! The output is raw template text; whitespace is left to `gofmt::format_source`.

use serde::Serialize;
use tera::{Context, Tera};

use crate::error::Result;
use crate::ir::{GoField, GoModel, TemplateModel};

pub const BANNER: &str = "// Code generated by swagger-structs. DO NOT EDIT.";

const TEMPLATE_NAME: &str = "models.go";

const MODELS_TEMPLATE: &str = r#"{{ banner }}
package models
{% for path in imports %}
import "{{ path }}"
{%- endfor %}
{% for model in models %}
type {{ model.name }} struct {
{%- for field in model.fields %}
	{{ field.name }} {{ field.type_name }} {{ field.tags }}
{%- endfor %}
}
{% endfor %}
"#;

#[derive(Serialize)]
struct TemplateContext<'a> {
    banner: &'static str,
    imports: &'a [String],
    models: Vec<ModelView<'a>>,
}

#[derive(Serialize)]
struct ModelView<'a> {
    name: &'a str,
    fields: Vec<FieldView<'a>>,
}

#[derive(Serialize)]
struct FieldView<'a> {
    name: &'a str,
    type_name: String,
    tags: String,
}

impl<'a> From<&'a GoModel> for ModelView<'a> {
    fn from(model: &'a GoModel) -> Self {
        Self {
            name: &model.name,
            fields: model.fields.iter().map(FieldView::from).collect(),
        }
    }
}

impl<'a> From<&'a GoField> for FieldView<'a> {
    fn from(field: &'a GoField) -> Self {
        Self {
            name: &field.name,
            type_name: field.ty.to_string(),
            tags: field.tags(),
        }
    }
}

fn models_template() -> Result<Tera> {
    let mut tera = Tera::default();
    // tags carry quotes and back quotes verbatim
    tera.autoescape_on(vec![]);
    tera.add_raw_template(TEMPLATE_NAME, MODELS_TEMPLATE)?;
    Ok(tera)
}

pub fn render(model: &TemplateModel) -> Result<String> {
    let tera = models_template()?;
    let context = Context::from_serialize(TemplateContext {
        banner: BANNER,
        imports: &model.imports,
        models: model.models.iter().map(ModelView::from).collect(),
    })?;
    Ok(tera.render(TEMPLATE_NAME, &context)?)
}
