//! Lower swagger definitions to the Go model IR.
//!
//! The mapping is total: dangling references and unmapped shapes degrade to
//! `GoType::Unknown` instead of failing. Both definitions and properties are
//! visited in sorted key order so the output is reproducible byte for byte.
//!
//! Pointer polarity is the historical one: *required* scalar fields become
//! pointers and optional ones stay bare. Array elements are never pointers
//! unless they are references.

use std::borrow::Cow;
use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::ir::{GoField, GoModel, GoType, TemplateModel, TIME_IMPORT};
use crate::swagger::{Definition, Definitions, Property, PropertyFormat, PropertyType};

/// Prefix of a local JSON reference, stripped before lookup.
pub const DEFINITIONS_REF_PREFIX: &str = "#/definitions/";

pub struct ModelsMapper<'a> {
    defs: &'a Definitions,
}

impl<'a> ModelsMapper<'a> {
    pub fn new(defs: &'a Definitions) -> Self {
        Self { defs }
    }

    pub fn template_model(&self) -> TemplateModel {
        let model = TemplateModel {
            imports: self.imports(),
            models: self.models(),
        };
        debug!(models = model.models.len(), imports = model.imports.len(), "mapped definitions");
        model
    }

    /// One model per definition, sorted by definition name.
    pub fn models(&self) -> Vec<GoModel> {
        let mut keys: Vec<&String> = self.defs.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| GoModel {
                name: model_name(key),
                fields: self.model_fields(&self.defs[key.as_str()]),
            })
            .collect()
    }

    /// Import paths needed by the generated file, each listed once.
    pub fn imports(&self) -> Vec<String> {
        let mut imports = BTreeSet::new();
        let props = self.defs.values().flat_map(|def| def.properties.values());
        for prop in props.flat_map(Property::walk) {
            if prop.is_date_time() {
                imports.insert(TIME_IMPORT);
            }
        }
        imports.into_iter().map(str::to_string).collect()
    }

    fn model_fields(&self, def: &Definition) -> Vec<GoField> {
        let mut keys: Vec<&String> = def.properties.keys().collect();
        keys.sort();

        keys.into_iter()
            .map(|key| GoField {
                name: public_field_name(key),
                ty: self.field_type(&def.properties[key.as_str()], def.is_required(key)),
                json_name: key.clone(),
            })
            .collect()
    }

    pub fn field_type(&self, prop: &Property, required: bool) -> GoType {
        let scalar = match (prop.kind, prop.format) {
            (PropertyType::String, PropertyFormat::DateTime) => GoType::Time,
            (PropertyType::String, _) => GoType::String,
            (PropertyType::Boolean, _) => GoType::Bool,
            (PropertyType::Number, _) => GoType::Float64,
            (PropertyType::Integer, PropertyFormat::Int32) => GoType::Int32,
            (PropertyType::Integer, PropertyFormat::Int64) => GoType::Int64,
            (PropertyType::Array, _) => {
                let elem = match prop.items.as_deref() {
                    Some(items) => self.field_type(items, false),
                    None => self.field_type(&Property::default(), false),
                };
                return elem.slice();
            }
            // integers without int32/int64 fall through to reference
            // resolution along with objects and untyped properties
            _ => return self.resolve_reference(&prop.reference),
        };

        if required { scalar.pointer() } else { scalar }
    }

    /// `*Name` for a known definition, `*unknown` otherwise.
    fn resolve_reference(&self, reference: &str) -> GoType {
        let name = reference.replacen(DEFINITIONS_REF_PREFIX, "", 1);
        if self.defs.contains_key(&name) {
            return GoType::Model(model_name(&name)).pointer();
        }
        warn!(reference, "unresolved reference, emitting unknown type");
        GoType::Unknown.pointer()
    }
}

/// Go identifier for a definition: dots are dropped (`foo.Bar` → `fooBar`).
pub fn model_name(name: &str) -> String {
    name.replace('.', "")
}

/// Exported Go field name for a property key.
///
/// `id` becomes `ID`; a trailing `Id` or `Url` becomes `ID`/`URL`; then the
/// first character is upper-cased.
pub fn public_field_name(name: &str) -> String {
    if name == "id" {
        return "ID".to_string();
    }

    let name: Cow<'_, str> = if let Some(stem) = name.strip_suffix("Id") {
        format!("{stem}ID").into()
    } else if let Some(stem) = name.strip_suffix("Url") {
        format!("{stem}URL").into()
    } else {
        name.into()
    };

    let mut chars = name.chars();
    match chars.next() {
        Some(first) => {
            let mut out = String::with_capacity(name.len());
            out.push(upper_rune(first));
            out.extend(chars);
            out
        }
        None => String::new(),
    }
}

/// One-to-one upper-casing: characters whose upper case expands to several
/// (`ß` → `SS`) are left alone.
fn upper_rune(c: char) -> char {
    let mut upper = c.to_uppercase();
    match (upper.next(), upper.next()) {
        (Some(single), None) => single,
        _ => c,
    }
}
