//! Static field registries describing the JSON shape each resource expects.
//!
//! One descriptor list per entity; the form endpoints serve these verbatim
//! so clients can render input forms without hardcoding field names.

use serde::Serialize;

/// How a field value travels in a request.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ParamType {
    Query,
    Form,
}

/// Display metadata for one input field.
#[derive(Debug, Clone, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub question: &'static str,
    pub param_type: ParamType,
}

pub const PEOPLE_FORM: &[FormField] = &[
    FormField {
        name: "name",
        question: "Name:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "email",
        question: "Email:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "affiliation",
        question: "Affiliation:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "roles",
        question: "Role code:",
        param_type: ParamType::Form,
    },
];

pub const TEXT_FORM: &[FormField] = &[
    FormField {
        name: "page_number",
        question: "Page number:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "title",
        question: "Title:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "text",
        question: "Text:",
        param_type: ParamType::Form,
    },
];

pub const MANUSCRIPT_FORM: &[FormField] = &[
    FormField {
        name: "title",
        question: "Title:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "author",
        question: "Author:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "author_email",
        question: "Author email:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "text",
        question: "Text:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "abstract",
        question: "Abstract:",
        param_type: ParamType::Form,
    },
    FormField {
        name: "editor_email",
        question: "Editor email:",
        param_type: ParamType::Form,
    },
];

/// Just the field names of a form, in declaration order.
pub fn field_names(form: &[FormField]) -> Vec<&'static str> {
    form.iter().map(|f| f.name).collect()
}
