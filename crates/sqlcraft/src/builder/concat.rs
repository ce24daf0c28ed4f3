//! Text-join primitives shared by every clause.
//!
//! A [`Concat`] accumulates fragments joined by a separator and renders them
//! between a prefix and a suffix. Statement builders configure one per clause
//! with the SQL keyword as prefix, so an empty clause renders nothing.
//! [`ParamConcat`] adds the ordered parameter list that travels with the text.

use crate::error::{SqlError, SqlResult};
use crate::value::Value;

/// Ordered text-join primitive with prefix/suffix/separator/default policy.
#[derive(Debug, Clone, PartialEq)]
pub struct Concat {
    prefix: Option<String>,
    suffix: Option<String>,
    separator: Option<String>,
    default_value: Option<String>,
    local_prefix: Option<String>,
    value: String,
    /// Fragments emitted so far, default substitutions included.
    fragments: usize,
    /// Whether any emitted fragment came from the caller rather than the default.
    has_text: bool,
    fault: Option<SqlError>,
}

impl Default for Concat {
    fn default() -> Self {
        Self::new()
    }
}

impl Concat {
    /// Create an empty concat with empty prefix/suffix and no separator.
    pub fn new() -> Self {
        Self {
            prefix: Some(String::new()),
            suffix: Some(String::new()),
            separator: None,
            default_value: None,
            local_prefix: None,
            value: String::new(),
            fragments: 0,
            has_text: false,
            fault: None,
        }
    }

    /// Create a concat rendered as `prefix + f1 + sep + ... + fn + suffix`.
    pub fn wrapped(prefix: &str, separator: Option<&str>, suffix: &str) -> Self {
        let mut c = Self::new();
        c.set_prefix(Some(prefix))
            .set_separator(separator)
            .set_suffix(Some(suffix));
        c
    }

    /// Clause configured with its keyword as prefix and no suffix.
    ///
    /// With `separator == None` the clause accepts exactly one fragment.
    pub fn clause(keyword: &str, separator: Option<&str>) -> Self {
        Self::wrapped(keyword, separator, "")
    }

    pub fn set_prefix(&mut self, prefix: Option<&str>) -> &mut Self {
        self.prefix = prefix.map(str::to_string);
        self
    }

    pub fn set_suffix(&mut self, suffix: Option<&str>) -> &mut Self {
        self.suffix = suffix.map(str::to_string);
        self
    }

    pub fn set_separator(&mut self, separator: Option<&str>) -> &mut Self {
        self.separator = separator.map(str::to_string);
        self
    }

    /// Text emitted once, before the next fragment, instead of the separator.
    pub fn set_local_prefix(&mut self, local_prefix: Option<&str>) -> &mut Self {
        self.local_prefix = local_prefix.map(str::to_string);
        self
    }

    /// Text substituted for empty appends.
    pub fn set_default_value(&mut self, default_value: Option<&str>) -> &mut Self {
        self.default_value = default_value.map(str::to_string);
        self
    }

    pub fn prefix(&self) -> Option<&str> {
        self.prefix.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn separator(&self) -> Option<&str> {
        self.separator.as_deref()
    }

    /// The accumulated fragments, without prefix or suffix.
    pub fn value(&self) -> &str {
        &self.value
    }

    /// The first builder-misuse fault recorded, if any.
    pub fn fault(&self) -> Option<&SqlError> {
        self.fault.as_ref()
    }

    /// True until a caller-supplied fragment has been appended.
    pub fn is_empty(&self) -> bool {
        !self.has_text
    }

    /// Append one fragment.
    ///
    /// An empty `value` is replaced by the default value; if there is none the
    /// append is skipped and no separator is consumed. Appending a second
    /// fragment without a separator records a builder-misuse fault, after
    /// which further appends are ignored.
    pub fn append(&mut self, value: &str) -> &mut Self {
        if self.fault.is_some() {
            return self;
        }

        let (text, from_caller) = if value.is_empty() {
            match &self.default_value {
                Some(default) => (default.clone(), false),
                None => return self,
            }
        } else {
            (value.to_string(), true)
        };

        if let Some(local_prefix) = self.local_prefix.take() {
            self.value.push_str(&local_prefix);
        } else if self.fragments > 0 {
            match &self.separator {
                Some(sep) => self.value.push_str(sep),
                None => {
                    self.fail(SqlError::builder(format!(
                        "no separator configured for '{}' clause; cannot append '{}' after '{}'",
                        self.prefix.as_deref().unwrap_or("").trim(),
                        text,
                        self.value
                    )));
                    return self;
                }
            }
        }

        self.value.push_str(&text);
        self.fragments += 1;
        self.has_text |= from_caller;
        self
    }

    /// Append each value in order.
    pub fn add<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for v in values {
            self.append(v.as_ref());
        }
        self
    }

    /// Clear the accumulated text and any fault, keeping the configuration.
    pub fn reset(&mut self) -> &mut Self {
        self.value.clear();
        self.fragments = 0;
        self.has_text = false;
        self.fault = None;
        self
    }

    /// Render `prefix + value + suffix`, or `""` when empty.
    pub fn to_sql(&self) -> SqlResult<String> {
        self.render(self.prefix.as_deref())
    }

    /// Render with the prefix suppressed.
    pub(crate) fn to_headless_sql(&self) -> SqlResult<String> {
        self.render(Some(""))
    }

    /// Render with a caller-supplied prefix in place of the configured one.
    pub(crate) fn render(&self, prefix: Option<&str>) -> SqlResult<String> {
        if let Some(fault) = &self.fault {
            return Err(fault.clone());
        }
        if self.is_empty() {
            return Ok(String::new());
        }
        let prefix = prefix.ok_or_else(|| {
            SqlError::builder(format!("cannot render '{}' without a prefix", self.value))
        })?;
        let suffix = self.suffix.as_deref().ok_or_else(|| {
            SqlError::builder(format!("cannot render '{}' without a suffix", self.value))
        })?;

        let mut out = String::with_capacity(prefix.len() + self.value.len() + suffix.len());
        out.push_str(prefix);
        out.push_str(&self.value);
        out.push_str(suffix);
        Ok(out)
    }

    /// Record a fault; the first one wins.
    pub(crate) fn fail(&mut self, err: SqlError) {
        if self.fault.is_none() {
            self.fault = Some(err);
        }
    }

    /// Replace the clause with parsed text: `prefix` becomes the keyword as
    /// written and `body` the single pre-existing fragment.
    pub(crate) fn hydrate(&mut self, prefix: &str, body: &str) {
        self.reset();
        self.prefix = Some(prefix.to_string());
        if !body.is_empty() {
            self.value.push_str(body);
            self.fragments = 1;
            self.has_text = true;
        }
    }
}

/// [`Concat`] plus a parallel ordered parameter list.
///
/// Parameters are recorded independently of whether the paired append emitted
/// any text, so callers pair `append` with `bind` to keep positions aligned.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ParamConcat {
    concat: Concat,
    params: Vec<Value>,
}

impl ParamConcat {
    pub fn new(concat: Concat) -> Self {
        Self {
            concat,
            params: Vec::new(),
        }
    }

    pub fn concat(&self) -> &Concat {
        &self.concat
    }

    pub fn concat_mut(&mut self) -> &mut Concat {
        &mut self.concat
    }

    pub fn append(&mut self, value: &str) -> &mut Self {
        self.concat.append(value);
        self
    }

    pub fn add<I, S>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.concat.add(values);
        self
    }

    /// Record one parameter.
    pub fn bind(&mut self, value: impl Into<Value>) -> &mut Self {
        self.params.push(value.into());
        self
    }

    /// Record parameters in iteration order.
    pub fn bind_all<I, V>(&mut self, values: I) -> &mut Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Value>,
    {
        self.params.extend(values.into_iter().map(Into::into));
        self
    }

    /// Record a slice of already-converted parameters.
    pub fn bind_list(&mut self, values: &[Value]) -> &mut Self {
        self.params.extend_from_slice(values);
        self
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    pub fn is_empty(&self) -> bool {
        self.concat.is_empty()
    }

    pub fn to_sql(&self) -> SqlResult<String> {
        self.concat.to_sql()
    }

    pub fn reset(&mut self) -> &mut Self {
        self.concat.reset();
        self.params.clear();
        self
    }
}

/// Join non-empty clause renderings with single spaces.
pub(crate) fn join_clauses<I>(clauses: I) -> String
where
    I: IntoIterator<Item = String>,
{
    let mut out = String::new();
    for clause in clauses {
        if clause.is_empty() {
            continue;
        }
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(&clause);
    }
    out
}
