//! In-memory document handles for exercising element functions.

use std::sync::{Arc, Mutex};

use indexmap::IndexMap;

use sift_core::{Context, ElementRef, Error, HtmlDocument, HtmlElement, Result, Value};

/// Element backed by an attribute map. Records every removal request.
#[derive(Debug, Default)]
pub struct MemoryElement {
    attributes: Mutex<IndexMap<String, String>>,
    removals: Mutex<Vec<Vec<String>>>,
}

impl MemoryElement {
    pub fn with_attributes(attrs: &[(&str, &str)]) -> Arc<Self> {
        let el = Self::default();
        {
            let mut map = el.attributes.lock().unwrap();
            for (k, v) in attrs {
                map.insert(k.to_string(), v.to_string());
            }
        }
        Arc::new(el)
    }

    pub fn attribute_names(&self) -> Vec<String> {
        self.attributes.lock().unwrap().keys().cloned().collect()
    }

    pub fn removals(&self) -> Vec<Vec<String>> {
        self.removals.lock().unwrap().clone()
    }
}

impl HtmlElement for MemoryElement {
    fn remove_attribute(&self, ctx: &Context, names: &[String]) -> Result<()> {
        ctx.check()?;
        self.removals.lock().unwrap().push(names.to_vec());
        let mut map = self.attributes.lock().unwrap();
        for name in names {
            map.shift_remove(name);
        }
        Ok(())
    }

    fn get_attribute(&self, ctx: &Context, name: &str) -> Result<Option<String>> {
        ctx.check()?;
        Ok(self.attributes.lock().unwrap().get(name).cloned())
    }

    fn set_attribute(&self, ctx: &Context, name: &str, value: &str) -> Result<()> {
        ctx.check()?;
        self.attributes
            .lock()
            .unwrap()
            .insert(name.to_string(), value.to_string());
        Ok(())
    }
}

#[derive(Debug)]
pub struct MemoryDocument {
    pub root: Arc<MemoryElement>,
}

impl HtmlDocument for MemoryDocument {
    fn element(&self) -> ElementRef {
        self.root.clone()
    }
}

/// Element whose driver lost the node; every effect fails.
#[derive(Debug)]
pub struct DetachedElement;

impl DetachedElement {
    fn detached() -> Error {
        Error::effect(std::io::Error::other("element is detached from the document"))
    }
}

impl HtmlElement for DetachedElement {
    fn remove_attribute(&self, _ctx: &Context, _names: &[String]) -> Result<()> {
        Err(Self::detached())
    }

    fn get_attribute(&self, _ctx: &Context, _name: &str) -> Result<Option<String>> {
        Err(Self::detached())
    }

    fn set_attribute(&self, _ctx: &Context, _name: &str, _value: &str) -> Result<()> {
        Err(Self::detached())
    }
}

pub fn element(el: &Arc<MemoryElement>) -> Value {
    Value::Element(el.clone())
}

pub fn strings(values: &[&str]) -> Vec<Value> {
    values.iter().map(|s| Value::from(*s)).collect()
}
