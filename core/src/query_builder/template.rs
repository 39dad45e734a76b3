use crate::query_builder::util::{scan_placeholders, Segment};
use crate::{Error, Result};
use indexmap::{IndexMap, IndexSet};
use serde::Deserialize;
use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::fmt::Display;
use std::hash::{BuildHasher, Hash};
use std::str::FromStr;

/// How the template scanner treats SQL literals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Syntax {
    /// Placeholders inside string literals, quoted identifiers, dollar quotes and comments are
    /// left alone.
    #[default]
    Sql,
    /// Every `:name` is a placeholder, wherever it appears. Only `::` casts are skipped.
    Plain,
}

impl FromStr for Syntax {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "sql" => Ok(Syntax::Sql),
            "plain" => Ok(Syntax::Plain),
            _ => Err(Error::ConfigError(format!("unknown syntax `{s}`, expected `sql` or `plain`"))),
        }
    }
}

/// A compiled query template.
///
/// Compiling scans the query once for `:name` placeholders, where `name` matches
/// `[A-Za-z_][A-Za-z0-9_]*`. The result can be rendered any number of times against different
/// substitutions, and shared across threads.
///
/// ```
/// use std::collections::HashMap;
/// use namedsql_core::Template;
///
/// let template = Template::compile("select * from films where name = :name");
/// let subs = HashMap::from([("name", "$1")]);
/// assert_eq!(template.render(&subs)?, "select * from films where name = $1");
/// # Ok::<(), namedsql_core::Error>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
    syntax: Syntax,
}

impl Template {
    pub fn compile(source: impl Into<String>) -> Self {
        Self::compile_with(source, Syntax::default())
    }

    pub fn compile_with(source: impl Into<String>, syntax: Syntax) -> Self {
        let source = source.into();
        let segments = scan_placeholders(&source, syntax);
        Self { source, segments, syntax }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn syntax(&self) -> Syntax {
        self.syntax
    }

    /// Distinct placeholder names, in order of first appearance.
    pub fn names(&self) -> IndexSet<&str> {
        self.params().collect()
    }

    pub fn has_placeholders(&self) -> bool {
        self.params().next().is_some()
    }

    pub fn references(&self, name: &str) -> bool {
        self.params().any(|p| p == name)
    }

    fn params(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Param(range) => Some(&self.source[range.clone()]),
            Segment::Text(_) => None,
        })
    }

    /// Replace every placeholder with its entry in `substitutions`.
    ///
    /// Fails with [`Error::UnknownPlaceholder`] on the first placeholder that has no entry.
    pub fn render<S: Substitutions + ?Sized>(&self, substitutions: &S) -> Result<String> {
        self.render_with(|name| substitutions.substitution(name))
    }

    /// Like [`render`](Self::render), but asks `lookup` for each placeholder's replacement.
    pub fn render_with<F, R>(&self, mut lookup: F) -> Result<String>
    where
        F: FnMut(&str) -> Option<R>,
        R: Display,
    {
        // 16 is arbitrary, most replacements are short
        let mut buf = String::with_capacity(self.source.len() + 16);
        for segment in &self.segments {
            match segment {
                Segment::Text(range) => buf.push_str(&self.source[range.clone()]),
                Segment::Param(range) => {
                    let name = &self.source[range.clone()];
                    let replacement = lookup(name).ok_or_else(|| Error::UnknownPlaceholder(name.to_string()))?;
                    buf.push_str(&replacement.to_string());
                }
            }
        }
        Ok(buf)
    }
}

/// A name -> replacement text mapping a [`Template`] can render against.
pub trait Substitutions {
    fn substitution(&self, name: &str) -> Option<&str>;
}

impl<K, V, S> Substitutions for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn substitution(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V, S> Substitutions for IndexMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn substitution(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

impl<K, V> Substitutions for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn substitution(&self, name: &str) -> Option<&str> {
        self.get(name).map(AsRef::as_ref)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn test_render_single() -> Result<()> {
        let template = Template::compile("select name, genre from films where name = :name");
        let subs = HashMap::from([("name", "$1")]);
        assert_eq!(template.render(&subs)?, "select name, genre from films where name = $1");
        Ok(())
    }

    #[test]
    fn test_no_placeholders_renders_unchanged() -> Result<()> {
        let sql = "select 1 from films where created < now() - interval '1 day'";
        let template = Template::compile(sql);
        assert!(!template.has_placeholders());
        assert_eq!(template.render(&HashMap::<String, String>::new())?, sql);
        assert_eq!(template.render(&HashMap::from([("name", "$1")]))?, sql);
        Ok(())
    }

    #[test]
    fn test_repeated_names_share_replacement() -> Result<()> {
        let template = Template::compile("select * from t where a = :x or b = :x or c = :y");
        assert_eq!(template.names().into_iter().collect::<Vec<_>>(), vec!["x", "y"]);
        let subs = BTreeMap::from([("x", "$2"), ("y", "$1")]);
        assert_eq!(template.render(&subs)?, "select * from t where a = $2 or b = $2 or c = $1");
        Ok(())
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let template = Template::compile("select :Name, :name");
        let subs = HashMap::from([("name", "'lower'")]);
        assert_matches!(template.render(&subs), Err(Error::UnknownPlaceholder(n)) if n == "Name");
    }

    #[test]
    fn test_unknown_placeholder_fails() {
        let template = Template::compile("select * from films where name = :name and genre = :genre");
        let subs = IndexMap::from([("name".to_string(), "$1".to_string())]);
        assert_matches!(template.render(&subs), Err(Error::UnknownPlaceholder(n)) if n == "genre");
    }

    #[test]
    fn test_literal_text_preserved() -> Result<()> {
        let sql = "select ':name', \"a:b\", x::text /* :name */ from t where y = :name -- trailing :name";
        let template = Template::compile(sql);
        let rendered = template.render(&HashMap::from([("name", "$1")]))?;
        assert_eq!(
            rendered,
            "select ':name', \"a:b\", x::text /* :name */ from t where y = $1 -- trailing :name"
        );
        Ok(())
    }

    #[test]
    fn test_plain_syntax_substitutes_everywhere() -> Result<()> {
        let template = Template::compile_with("select ':name' where y = :name", Syntax::Plain);
        assert_eq!(template.render(&HashMap::from([("name", "$1")]))?, "select '$1' where y = $1");
        Ok(())
    }

    #[test]
    fn test_degenerate_template_is_literal() -> Result<()> {
        let template = Template::compile("select 1:");
        assert_eq!(template.render(&HashMap::<&str, &str>::new())?, "select 1:");
        let template = Template::compile(":");
        assert_eq!(template.render(&HashMap::<&str, &str>::new())?, ":");
        Ok(())
    }

    #[test]
    fn test_render_with_display() -> Result<()> {
        let template = Template::compile("insert into t values (:a, :b, :a)");
        let rendered = template.render_with(|name| match name {
            "a" => Some(1),
            "b" => Some(2),
            _ => None,
        })?;
        assert_eq!(rendered, "insert into t values (1, 2, 1)");
        Ok(())
    }

    #[test]
    fn test_parse_syntax() {
        assert_eq!("plain".parse::<Syntax>().unwrap(), Syntax::Plain);
        assert_matches!("naive".parse::<Syntax>(), Err(Error::ConfigError(_)));
    }
}
