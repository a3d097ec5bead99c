//! Error types for the parse, link and render phases.

use std::path::PathBuf;
use thiserror::Error;

/// Schema violation found while building the data model from XML.
///
/// `position` is the `line:column` of the offending node in its file.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed XML: {0}")]
    Xml(String),

    #[error("{position}: expected root element <{expected}>, found <{found}>")]
    UnexpectedRoot {
        expected: &'static str,
        found: String,
        position: String,
    },

    #[error("{position}: unexpected element <{found}> inside <{parent}>")]
    UnexpectedElement {
        parent: String,
        found: String,
        position: String,
    },

    #[error("{position}: unexpected text inside <{element}>: {text:?}")]
    UnexpectedText {
        element: String,
        text: String,
        position: String,
    },

    #[error("{position}: unexpected attribute '{attribute}' on <{element}>")]
    UnexpectedAttribute {
        element: String,
        attribute: String,
        position: String,
    },

    #[error("{position}: <{element}> is missing required attribute '{attribute}'")]
    MissingAttribute {
        element: String,
        attribute: String,
        position: String,
    },

    #[error("{position}: attribute '{attribute}' on <{element}> is '{value}', expected {expected}")]
    InvalidAttribute {
        element: String,
        attribute: String,
        value: String,
        expected: &'static str,
        position: String,
    },

    #[error("{position}: <{element}> is missing required child <{child}>")]
    MissingElement {
        element: String,
        child: &'static str,
        position: String,
    },

    #[error("{position}: <{child}> appears more than once inside <{element}>")]
    DuplicateElement {
        element: String,
        child: String,
        position: String,
    },

    #[error("{position}: <{found}> cannot be combined with <{started}> inside <{element}>")]
    ChoiceConflict {
        element: String,
        started: &'static str,
        found: String,
        position: String,
    },

    #[error("{position}: <{element}> must contain only text, found <{found}>")]
    ExpectedText {
        element: String,
        found: String,
        position: String,
    },
}

/// Broken invariant while wiring compounds into hierarchies.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LinkError {
    #[error("duplicate {collection} id '{id}'")]
    DuplicateId { collection: &'static str, id: String },

    #[error("{collection} '{id}' not found")]
    NotFound { collection: &'static str, id: String },

    #[error("'{owner}' lists <{element}> '{refid}' which is not a known {collection}")]
    DanglingReference {
        owner: String,
        element: String,
        refid: String,
        collection: &'static str,
    },

    #[error("'{id}' is claimed by two parents: '{first}' and '{second}'")]
    MultipleParents {
        id: String,
        first: String,
        second: String,
    },

    #[error("'{name}' ({id}) does not start with '{parent_name}{separator}' of its parent '{parent_id}'")]
    NameMismatch {
        id: String,
        name: String,
        parent_id: String,
        parent_name: String,
        separator: &'static str,
    },

    #[error("parent chain of '{id}' forms a cycle")]
    Cycle { id: String },
}

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RenderError {
    #[error("unknown format: {0}. Use markdown, html, or text")]
    UnknownFormat(String),
}

/// Umbrella error for the workspace entry points.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: ParseError,
    },

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
