//! Kind-keyed translation rules: how a value becomes a token, and whether its
//! flag is emitted at all.
use std::collections::HashMap;
use std::sync::Arc;

use super::value::{ArgValue, ValueKind};

/// What to place after a field's flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rendered {
    /// The flag alone (boolean switches).
    Bare,
    /// The flag followed by one token.
    Value(String),
    /// The flag repeated once per token.
    Repeated(Vec<String>),
}

pub type TranslateFn = Arc<dyn Fn(&ArgValue) -> Rendered + Send + Sync>;
pub type IncludeFn = Arc<dyn Fn(&ArgValue) -> bool + Send + Sync>;

/// Immutable rule tables. Build once, share through `Arc`.
#[derive(Clone)]
pub struct Translator {
    translate: HashMap<ValueKind, TranslateFn>,
    include: HashMap<ValueKind, IncludeFn>,
}

impl Translator {
    /// A builder pre-populated with the youtube-dl rules.
    pub fn builder() -> TranslatorBuilder {
        TranslatorBuilder::standard()
    }

    /// Translate one value; `None` means the field is omitted entirely.
    pub fn translate(&self, value: &ArgValue) -> Option<Rendered> {
        let kind = value.kind();
        if let Some(include) = self.include.get(&kind) {
            if !include(value) {
                return None;
            }
        }
        let rendered = match self.translate.get(&kind) {
            Some(rule) => rule(value),
            None => Rendered::Value(value.to_string()),
        };
        Some(rendered)
    }

    pub fn has_rule(&self, kind: ValueKind) -> bool {
        self.translate.contains_key(&kind)
    }
}

impl Default for Translator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl std::fmt::Debug for Translator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Translator")
            .field("translate", &self.translate.keys().collect::<Vec<_>>())
            .field("include", &self.include.keys().collect::<Vec<_>>())
            .finish()
    }
}

pub struct TranslatorBuilder {
    translate: HashMap<ValueKind, TranslateFn>,
    include: HashMap<ValueKind, IncludeFn>,
}

impl TranslatorBuilder {
    /// No rules at all: every value falls back to its natural form.
    pub fn empty() -> Self {
        Self {
            translate: HashMap::new(),
            include: HashMap::new(),
        }
    }

    pub fn standard() -> Self {
        Self::empty()
            .translate_with(ValueKind::Date, |v| match v {
                ArgValue::Date(d) => Rendered::Value(d.format("%Y%m%d").to_string()),
                other => Rendered::Value(other.to_string()),
            })
            .translate_with(ValueKind::ByteSize, |v| match v {
                ArgValue::ByteSize(b) => Rendered::Value(b.bytes().to_string()),
                other => Rendered::Value(other.to_string()),
            })
            .translate_with(ValueKind::Flag, |_| Rendered::Bare)
            .include_when(ValueKind::Flag, |v| matches!(v, ArgValue::Flag(true)))
            .translate_with(ValueKind::Map, |v| match v {
                ArgValue::Map(m) => Rendered::Repeated(m.entry_tokens()),
                other => Rendered::Value(other.to_string()),
            })
            .include_when(ValueKind::Map, |v| match v {
                ArgValue::Map(m) => !m.is_empty(),
                _ => true,
            })
            .include_when(ValueKind::Text, |v| match v {
                ArgValue::Text(s) => !s.is_empty(),
                _ => true,
            })
            .include_when(ValueKind::Path, |v| match v {
                ArgValue::Path(p) => !p.as_os_str().is_empty(),
                _ => true,
            })
    }

    pub fn translate_with<F>(mut self, kind: ValueKind, rule: F) -> Self
    where
        F: Fn(&ArgValue) -> Rendered + Send + Sync + 'static,
    {
        self.translate.insert(kind, Arc::new(rule));
        self
    }

    pub fn include_when<F>(mut self, kind: ValueKind, rule: F) -> Self
    where
        F: Fn(&ArgValue) -> bool + Send + Sync + 'static,
    {
        self.include.insert(kind, Arc::new(rule));
        self
    }

    pub fn build(self) -> Translator {
        Translator {
            translate: self.translate,
            include: self.include,
        }
    }
}
