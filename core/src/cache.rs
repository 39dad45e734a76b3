use crate::query_builder::{Syntax, Template};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::{Arc, Mutex, PoisonError};

/// Bounded LRU cache of compiled templates, keyed by query text.
///
/// Only compiled templates are cached, never query results. A capacity of zero disables
/// caching: every lookup compiles afresh.
#[derive(Debug)]
pub struct TemplateCache {
    inner: Option<Mutex<LruCache<String, Arc<Template>>>>,
}

impl TemplateCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            inner: NonZeroUsize::new(capacity).map(|cap| Mutex::new(LruCache::new(cap))),
        }
    }

    pub fn disabled() -> Self {
        Self { inner: None }
    }

    pub fn get_or_compile(&self, source: &str, syntax: Syntax) -> Arc<Template> {
        let Some(inner) = &self.inner else {
            return Arc::new(Template::compile_with(source, syntax));
        };
        let mut cache = inner.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(template) = cache.get(source) {
            // a template cached under the other syntax is recompiled and replaced
            if template.syntax() == syntax {
                return Arc::clone(template);
            }
        }
        let template = Arc::new(Template::compile_with(source, syntax));
        cache.put(source.to_string(), Arc::clone(&template));
        template
    }

    pub fn capacity(&self) -> usize {
        self.inner.as_ref().map_or(0, |inner| {
            inner.lock().unwrap_or_else(PoisonError::into_inner).cap().get()
        })
    }

    pub fn len(&self) -> usize {
        self.inner
            .as_ref()
            .map_or(0, |inner| inner.lock().unwrap_or_else(PoisonError::into_inner).len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Some(inner) = &self.inner {
            inner.lock().unwrap_or_else(PoisonError::into_inner).clear();
        }
    }
}

impl Default for TemplateCache {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_TEMPLATE_CACHE_SIZE)
    }
}
