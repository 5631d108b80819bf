use std::path::PathBuf;

use super::translator::{Rendered, Translator};
use super::value::ArgValue;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRole {
    /// `--flag [value]`.
    Flag,
    /// Value emitted without a flag (URLs).
    Positional,
    /// Not an argument; becomes the process working directory.
    WorkingDirectory,
}

/// One declared option. `value == None` is the no-value sentinel.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    pub flag: &'static str,
    pub value: Option<ArgValue>,
    pub role: FieldRole,
}

impl Field {
    pub fn new<T: Into<ArgValue>>(flag: &'static str, value: Option<T>) -> Self {
        Self {
            flag,
            value: value.map(Into::into),
            role: FieldRole::Flag,
        }
    }

    pub fn switch(flag: &'static str, on: bool) -> Self {
        Self {
            flag,
            value: Some(ArgValue::Flag(on)),
            role: FieldRole::Flag,
        }
    }

    pub fn positional<T: Into<ArgValue>>(value: T) -> Self {
        Self {
            flag: "",
            value: Some(value.into()),
            role: FieldRole::Positional,
        }
    }

    pub fn working_directory(path: Option<PathBuf>) -> Self {
        Self {
            flag: "",
            value: path.map(ArgValue::Path),
            role: FieldRole::WorkingDirectory,
        }
    }
}

/// A record of typed options, listed in the order they must appear on the
/// command line.
pub trait OptionSet {
    fn fields(&self) -> Vec<Field>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AssembledCommand {
    pub tokens: Vec<String>,
    pub working_directory: Option<PathBuf>,
}

impl AssembledCommand {
    /// Space-joined tokens, each quoted so it survives as one argument.
    pub fn argument_string(&self) -> String {
        shell_words::join(&self.tokens)
    }
}

pub fn assemble<O: OptionSet + ?Sized>(translator: &Translator, options: &O) -> AssembledCommand {
    let mut out = AssembledCommand::default();

    for field in options.fields() {
        let Some(value) = field.value.as_ref() else {
            continue;
        };

        if field.role == FieldRole::WorkingDirectory {
            let dir = value.to_string();
            if !dir.trim().is_empty() {
                out.working_directory = Some(PathBuf::from(dir));
            }
            continue;
        }

        let Some(rendered) = translator.translate(value) else {
            tracing::trace!(flag = field.flag, "argument suppressed");
            continue;
        };

        match (field.role, rendered) {
            (FieldRole::Positional, Rendered::Bare) => {}
            (FieldRole::Positional, Rendered::Value(v)) => out.tokens.push(v),
            (FieldRole::Positional, Rendered::Repeated(vs)) => out.tokens.extend(vs),
            (_, Rendered::Bare) => out.tokens.push(field.flag.to_string()),
            (_, Rendered::Value(v)) => {
                out.tokens.push(field.flag.to_string());
                out.tokens.push(v);
            }
            (_, Rendered::Repeated(vs)) => {
                for v in vs {
                    out.tokens.push(field.flag.to_string());
                    out.tokens.push(v);
                }
            }
        }
    }

    tracing::debug!(
        tokens = out.tokens.len(),
        working_directory = ?out.working_directory,
        "assembled command"
    );
    out
}
