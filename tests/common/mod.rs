//! In-memory documents implementing the driver capabilities.
//!
//! Pages are built from [`NodeSpec`] trees. Selectors support comma lists
//! of compound selectors (`tag`, `*`, `#id`, `.class`, `[attr]`,
//! `[attr=v]`, `[attr*=v]`); XPath never matches. Scripts from
//! `resilient_locator::shadow::scripts` are answered natively.

#![allow(dead_code)]

use std::fmt;
use std::io::Cursor;
use std::sync::Arc;

use async_trait::async_trait;
use image::{ImageBuffer, ImageFormat, Rgb};
use parking_lot::Mutex;
use serde_json::{Value, json};

use resilient_locator::shadow::scripts;
use resilient_locator::{
    By, ElementHandle, ElementId, Error, Result, ScriptArg, ScriptValue, Session,
};

// ============================================================================
// Logging
// ============================================================================

/// Installs a test subscriber once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}

// ============================================================================
// Page Description
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShadowKind {
    Open,
    Closed,
}

/// Declarative node used to build pages.
#[derive(Debug, Clone)]
pub struct NodeSpec {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<NodeSpec>,
    shadow: Option<(ShadowKind, Vec<NodeSpec>)>,
    displayed: bool,
    enabled: bool,
    selected: bool,
}

pub fn el(tag: &str) -> NodeSpec {
    NodeSpec {
        tag: tag.to_string(),
        attrs: Vec::new(),
        text: String::new(),
        children: Vec::new(),
        shadow: None,
        displayed: true,
        enabled: true,
        selected: false,
    }
}

impl NodeSpec {
    pub fn attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.push((name.to_string(), value.to_string()));
        self
    }

    pub fn id(self, id: &str) -> Self {
        self.attr("id", id)
    }

    pub fn text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn child(mut self, child: NodeSpec) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn open_shadow(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.shadow = Some((ShadowKind::Open, children.into_iter().collect()));
        self
    }

    pub fn closed_shadow(mut self, children: impl IntoIterator<Item = NodeSpec>) -> Self {
        self.shadow = Some((ShadowKind::Closed, children.into_iter().collect()));
        self
    }

    pub fn hidden(mut self) -> Self {
        self.displayed = false;
        self
    }

    pub fn disabled(mut self) -> Self {
        self.enabled = false;
        self
    }

    pub fn selected(mut self) -> Self {
        self.selected = true;
        self
    }
}

/// A `<select>` with one `<option>` per entry; option value equals text.
pub fn select(id: &str, options: &[&str]) -> NodeSpec {
    el("select")
        .id(id)
        .attr("name", "State")
        .attr("class", "form-control")
        .children(
            options
                .iter()
                .map(|text| el("option").attr("value", text).text(text)),
        )
}

/// A radio input.
pub fn radio(id: &str, value: &str) -> NodeSpec {
    el("input")
        .id(id)
        .attr("type", "radio")
        .attr("name", "gender")
        .attr("value", value)
}

/// The practice form: first name, three gender radios and a state select.
pub fn practice_form() -> NodeSpec {
    el("form").id("automationtestform").children([
        el("label").text("First Name"),
        el("input")
            .id("fname")
            .attr("name", "First Name")
            .attr("placeholder", "Name"),
        el("label").text("Gender"),
        radio("male", "Male"),
        radio("female", "Female"),
        radio("transgender", "Transgender"),
        el("label").text("State"),
        select("state", &["Select State", "Goa", "India", "Kerala"]),
    ])
}

/// Shadow-form content: same fields, no form element.
pub fn shadow_fields() -> Vec<NodeSpec> {
    vec![
        el("input").id("fname").attr("name", "First Name"),
        radio("male", "Male"),
        radio("female", "Female"),
        select("state", &["Select State", "Goa", "India"]),
    ]
}

// ============================================================================
// Arena
// ============================================================================

#[derive(Debug, Clone)]
struct Node {
    tag: String,
    attrs: Vec<(String, String)>,
    text: String,
    children: Vec<usize>,
    shadow: Option<(ShadowKind, Vec<usize>)>,
    displayed: bool,
    enabled: bool,
    value: String,
    checked: bool,
    selected: bool,
    input_events: usize,
}

impl Node {
    fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    fn has_value(&self) -> bool {
        matches!(self.tag.as_str(), "input" | "textarea" | "select")
    }

    fn is_custom(&self) -> bool {
        self.tag.contains('-')
    }

    fn open_shadow(&self) -> Option<&[usize]> {
        match &self.shadow {
            Some((ShadowKind::Open, roots)) => Some(roots),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
struct Document {
    roots: Vec<usize>,
    frames: Vec<usize>,
    inaccessible: bool,
}

/// Shared page state.
#[derive(Debug, Default)]
pub struct Dom {
    nodes: Vec<Node>,
    documents: Vec<Document>,
    main_frame_broken: bool,
    queries: Vec<String>,
    scripts_run: usize,
    clicks: usize,
}

impl Dom {
    fn insert(&mut self, spec: NodeSpec) -> usize {
        let children: Vec<usize> = spec.children.into_iter().map(|c| self.insert(c)).collect();
        let shadow = spec.shadow.map(|(kind, roots)| {
            let roots: Vec<usize> = roots.into_iter().map(|c| self.insert(c)).collect();
            (kind, roots)
        });
        let value = if spec.tag == "input" {
            String::new()
        } else {
            spec.attrs
                .iter()
                .find(|(n, _)| n == "value")
                .map(|(_, v)| v.clone())
                .unwrap_or_default()
        };

        self.nodes.push(Node {
            tag: spec.tag,
            attrs: spec.attrs,
            text: spec.text,
            children,
            shadow,
            displayed: spec.displayed,
            enabled: spec.enabled,
            value,
            checked: false,
            selected: spec.selected,
            input_events: 0,
        });
        let index = self.nodes.len() - 1;

        if self.nodes[index].tag == "select" {
            let options = self.nodes[index].children.clone();
            if !options.iter().any(|&o| self.nodes[o].selected)
                && let Some(&first) = options.first()
            {
                self.nodes[first].selected = true;
            }
        }
        index
    }

    fn add_document(&mut self, roots: Vec<NodeSpec>) -> usize {
        let roots = roots.into_iter().map(|r| self.insert(r)).collect();
        self.documents.push(Document {
            roots,
            ..Document::default()
        });
        self.documents.len() - 1
    }

    /// Nodes under `roots` in document order, not crossing shadow roots.
    fn tree(&self, roots: &[usize]) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack: Vec<usize> = roots.iter().rev().copied().collect();
        while let Some(index) = stack.pop() {
            out.push(index);
            stack.extend(self.nodes[index].children.iter().rev().copied());
        }
        out
    }

    fn light_dom(&self, doc: usize) -> Vec<usize> {
        self.tree(&self.documents[doc].roots)
    }

    fn matches(&self, index: usize, selector: &str) -> bool {
        selector
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .any(|compound| match parse_compound(compound) {
                Some(parts) => parts.iter().all(|part| self.part_matches(index, part)),
                None => false,
            })
    }

    fn part_matches(&self, index: usize, part: &Part) -> bool {
        let node = &self.nodes[index];
        match part {
            Part::Any => true,
            Part::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
            Part::Id(id) => node.attr("id") == Some(id.as_str()),
            Part::Class(class) => node
                .attr("class")
                .is_some_and(|c| c.split_whitespace().any(|c| c == class)),
            Part::Has(name) => node.attr(name).is_some(),
            Part::Equals(name, value) => node.attr(name) == Some(value.as_str()),
            Part::Contains(name, value) => node.attr(name).is_some_and(|v| v.contains(value.as_str())),
        }
    }

    fn find_in(&self, scope: &[usize], by: &By) -> Vec<usize> {
        scope
            .iter()
            .copied()
            .filter(|&index| {
                let node = &self.nodes[index];
                match by {
                    By::Css(selector) => self.matches(index, selector),
                    By::Id(id) => node.attr("id") == Some(id.as_str()),
                    By::Name(name) => node.attr("name") == Some(name.as_str()),
                    By::Tag(tag) => node.tag.eq_ignore_ascii_case(tag),
                    By::Class(class) => self.part_matches(index, &Part::Class(class.clone())),
                    By::XPath(_) => false,
                }
            })
            .collect()
    }

    fn selected_option(&self, select: usize) -> Option<usize> {
        self.nodes[select]
            .children
            .iter()
            .copied()
            .find(|&o| self.nodes[o].selected)
    }

    fn choose_option(&mut self, select: usize, option: usize) {
        for o in self.nodes[select].children.clone() {
            self.nodes[o].selected = o == option;
        }
        self.nodes[select].input_events += 1;
    }

    fn check(&mut self, index: usize) {
        if self.nodes[index].attr("type") == Some("radio") {
            let group = self.nodes[index].attr("name").map(str::to_string);
            for node in &mut self.nodes {
                if node.attr("type") == Some("radio") && node.attr("name").map(str::to_string) == group {
                    node.checked = false;
                }
            }
        }
        self.nodes[index].checked = true;
    }
}

// ============================================================================
// Selector Parsing
// ============================================================================

#[derive(Debug, Clone)]
enum Part {
    Any,
    Tag(String),
    Id(String),
    Class(String),
    Has(String),
    Equals(String, String),
    Contains(String, String),
}

fn parse_compound(compound: &str) -> Option<Vec<Part>> {
    let chars: Vec<char> = compound.chars().collect();
    let mut parts = Vec::new();
    let mut i = 0;

    let ident = |i: &mut usize| {
        let start = *i;
        while *i < chars.len() && (chars[*i].is_alphanumeric() || chars[*i] == '-' || chars[*i] == '_') {
            *i += 1;
        }
        chars[start..*i].iter().collect::<String>()
    };

    while i < chars.len() {
        match chars[i] {
            '*' => {
                parts.push(Part::Any);
                i += 1;
            }
            '#' => {
                i += 1;
                parts.push(Part::Id(ident(&mut i)));
            }
            '.' => {
                i += 1;
                parts.push(Part::Class(ident(&mut i)));
            }
            '[' => {
                let close = chars[i..].iter().position(|&c| c == ']')? + i;
                let inner: String = chars[i + 1..close].iter().collect();
                parts.push(parse_attribute(&inner));
                i = close + 1;
            }
            c if c.is_alphabetic() => parts.push(Part::Tag(ident(&mut i))),
            _ => return None,
        }
    }
    Some(parts)
}

fn parse_attribute(inner: &str) -> Part {
    let unquote = |v: &str| v.trim().trim_matches(|c| c == '\'' || c == '"').to_string();
    if let Some((name, value)) = inner.split_once("*=") {
        Part::Contains(name.trim().to_string(), unquote(value))
    } else if let Some((name, value)) = inner.split_once('=') {
        Part::Equals(name.trim().to_string(), unquote(value))
    } else {
        Part::Has(inner.trim().to_string())
    }
}

// ============================================================================
// FakeElement
// ============================================================================

#[derive(Clone)]
pub struct FakeElement {
    id: ElementId,
    index: usize,
    dom: Arc<Mutex<Dom>>,
}

impl fmt::Debug for FakeElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeElement").field("id", &self.id).finish()
    }
}

impl FakeElement {
    fn new(index: usize, dom: &Arc<Mutex<Dom>>) -> Self {
        Self {
            id: ElementId::new(index.to_string()),
            index,
            dom: Arc::clone(dom),
        }
    }

    pub fn tag(&self) -> String {
        self.dom.lock().nodes[self.index].tag.clone()
    }

    pub fn attr(&self, name: &str) -> Option<String> {
        self.dom.lock().nodes[self.index].attr(name).map(str::to_string)
    }
}

#[async_trait]
impl ElementHandle for FakeElement {
    fn id(&self) -> &ElementId {
        &self.id
    }

    async fn is_displayed(&self) -> Result<bool> {
        Ok(self.dom.lock().nodes[self.index].displayed)
    }

    async fn is_enabled(&self) -> Result<bool> {
        Ok(self.dom.lock().nodes[self.index].enabled)
    }

    async fn is_selected(&self) -> Result<bool> {
        let dom = self.dom.lock();
        let node = &dom.nodes[self.index];
        Ok(node.checked || node.selected)
    }

    async fn value(&self) -> Result<Option<String>> {
        let dom = self.dom.lock();
        let node = &dom.nodes[self.index];
        Ok(match node.tag.as_str() {
            "select" => dom
                .selected_option(self.index)
                .map(|o| dom.nodes[o].attr("value").unwrap_or_default().to_string()),
            _ if node.has_value() => Some(node.value.clone()),
            _ => None,
        })
    }

    async fn clear(&self) -> Result<()> {
        self.dom.lock().nodes[self.index].value.clear();
        Ok(())
    }

    async fn send_keys(&self, text: &str) -> Result<()> {
        let mut dom = self.dom.lock();
        let node = &mut dom.nodes[self.index];
        node.value.push_str(text);
        node.input_events += 1;
        Ok(())
    }

    async fn click(&self) -> Result<()> {
        let mut dom = self.dom.lock();
        dom.clicks += 1;
        let kind = dom.nodes[self.index].attr("type").map(str::to_string);
        match kind.as_deref() {
            Some("radio") => dom.check(self.index),
            Some("checkbox") => {
                let checked = dom.nodes[self.index].checked;
                dom.nodes[self.index].checked = !checked;
            }
            _ => {}
        }
        Ok(())
    }

    async fn select_by_text(&self, text: &str) -> Result<()> {
        let mut dom = self.dom.lock();
        let option = dom.nodes[self.index]
            .children
            .iter()
            .copied()
            .find(|&o| dom.nodes[o].text == text)
            .ok_or_else(|| Error::invalid_argument(format!("No option with text '{text}'")))?;
        dom.choose_option(self.index, option);
        Ok(())
    }

    async fn selected_text(&self) -> Result<Option<String>> {
        let dom = self.dom.lock();
        Ok(dom
            .selected_option(self.index)
            .map(|o| dom.nodes[o].text.clone()))
    }
}

// ============================================================================
// FakeSession
// ============================================================================

/// A browsing context over a shared [`Dom`].
#[derive(Clone)]
pub struct FakeSession {
    dom: Arc<Mutex<Dom>>,
    doc: usize,
}

impl fmt::Debug for FakeSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FakeSession").field("doc", &self.doc).finish()
    }
}

impl FakeSession {
    /// Main document holding `roots`.
    pub fn page(roots: impl IntoIterator<Item = NodeSpec>) -> Self {
        let mut dom = Dom::default();
        dom.add_document(roots.into_iter().collect());
        Self {
            dom: Arc::new(Mutex::new(dom)),
            doc: 0,
        }
    }

    /// Adds a top-level frame and returns its index.
    pub fn add_frame(&self, roots: impl IntoIterator<Item = NodeSpec>) -> usize {
        let mut dom = self.dom.lock();
        let doc = dom.add_document(roots.into_iter().collect());
        dom.documents[0].frames.push(doc);
        dom.documents[0].frames.len() - 1
    }

    /// Adds a top-level frame that refuses to be entered.
    pub fn add_inaccessible_frame(&self) -> usize {
        let index = self.add_frame(Vec::new());
        let mut dom = self.dom.lock();
        let doc = dom.documents[0].frames[index];
        dom.documents[doc].inaccessible = true;
        index
    }

    pub fn break_main_frame(&self) {
        self.dom.lock().main_frame_broken = true;
    }

    /// Index of the document this handle is bound to; 0 is the main one.
    pub fn document(&self) -> usize {
        self.doc
    }

    /// `By` descriptions passed to `find`, in call order.
    pub fn queries(&self) -> Vec<String> {
        self.dom.lock().queries.clone()
    }

    pub fn clear_queries(&self) {
        self.dom.lock().queries.clear();
    }

    pub fn scripts_run(&self) -> usize {
        self.dom.lock().scripts_run
    }

    pub fn clicks(&self) -> usize {
        self.dom.lock().clicks
    }

    /// Live value of the first element with `id`, searching every tree.
    pub fn value_of(&self, id: &str) -> Option<String> {
        let dom = self.dom.lock();
        let index = dom.nodes.iter().position(|n| n.attr("id") == Some(id))?;
        let node = &dom.nodes[index];
        if node.tag == "select" {
            return dom.selected_option(index).map(|o| dom.nodes[o].text.clone());
        }
        Some(node.value.clone())
    }

    /// Live values of every element with `id`, in arena order.
    pub fn values_of(&self, id: &str) -> Vec<String> {
        let dom = self.dom.lock();
        dom.nodes
            .iter()
            .filter(|n| n.attr("id") == Some(id))
            .map(|n| n.value.clone())
            .collect()
    }

    pub fn is_checked(&self, id: &str) -> bool {
        let dom = self.dom.lock();
        dom.nodes
            .iter()
            .any(|n| n.attr("id") == Some(id) && n.checked)
    }

    /// Number of `input` events dispatched to elements with `id`.
    pub fn input_events(&self, id: &str) -> usize {
        let dom = self.dom.lock();
        dom.nodes
            .iter()
            .filter(|n| n.attr("id") == Some(id))
            .map(|n| n.input_events)
            .sum()
    }

    pub fn set_displayed(&self, id: &str, displayed: bool) {
        let mut dom = self.dom.lock();
        for node in dom.nodes.iter_mut().filter(|n| n.attr("id") == Some(id)) {
            node.displayed = displayed;
        }
    }

    fn element(&self, index: usize) -> FakeElement {
        FakeElement::new(index, &self.dom)
    }

    fn elements(&self, indices: Vec<usize>) -> ScriptValue<FakeElement> {
        ScriptValue::Elements(indices.into_iter().map(|i| self.element(i)).collect())
    }

    fn run_script(
        &self,
        script: &str,
        args: &[ScriptArg<FakeElement>],
    ) -> Result<ScriptValue<FakeElement>> {
        let element = |i: usize| args.get(i).and_then(ScriptArg::as_element).map(|e| e.index);
        let string = |i: usize| {
            args.get(i)
                .and_then(ScriptArg::as_value)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string()
        };

        let mut dom = self.dom.lock();
        dom.scripts_run += 1;

        if script == scripts::SHADOW_MODE {
            let Some(host) = element(0) else {
                return Ok(ScriptValue::Value(json!("none")));
            };
            let node = &dom.nodes[host];
            let mode = match node.shadow {
                Some((ShadowKind::Open, _)) => "open",
                Some((ShadowKind::Closed, _)) => "closed",
                None if node.is_custom() => "closed",
                None => "none",
            };
            Ok(ScriptValue::Value(json!(mode)))
        } else if script == scripts::QUERY_SHADOW {
            let selector = string(1);
            let Some(roots) = element(0).and_then(|h| dom.nodes[h].open_shadow()) else {
                return Ok(ScriptValue::Null);
            };
            let hit = dom
                .tree(roots)
                .into_iter()
                .find(|&i| dom.matches(i, &selector));
            drop(dom);
            Ok(hit.map_or(ScriptValue::Null, |i| ScriptValue::Element(self.element(i))))
        } else if script == scripts::NESTED_HOSTS {
            let Some(roots) = element(0).and_then(|h| dom.nodes[h].open_shadow()) else {
                return Ok(ScriptValue::Elements(Vec::new()));
            };
            let hosts = host_filter(&dom, dom.tree(roots));
            drop(dom);
            Ok(self.elements(hosts))
        } else if script == scripts::LIGHT_DOM_HOSTS {
            let hosts = host_filter(&dom, dom.light_dom(self.doc));
            drop(dom);
            Ok(self.elements(hosts))
        } else if script == scripts::OPEN_SHADOW_HOSTS {
            let hosts: Vec<usize> = dom
                .light_dom(self.doc)
                .into_iter()
                .filter(|&i| dom.nodes[i].open_shadow().is_some())
                .collect();
            drop(dom);
            Ok(self.elements(hosts))
        } else if script == scripts::SCAN_BY_ID {
            let id = string(0);
            let hit = dom
                .light_dom(self.doc)
                .into_iter()
                .find(|&i| dom.nodes[i].attr("id") == Some(id.as_str()));
            drop(dom);
            Ok(hit.map_or(ScriptValue::Null, |i| ScriptValue::Element(self.element(i))))
        } else if script == scripts::SET_VALUE {
            let Some(target) = element(0) else {
                return Ok(ScriptValue::Value(json!(false)));
            };
            let inputs_only = args
                .get(2)
                .and_then(ScriptArg::as_value)
                .and_then(Value::as_bool)
                .unwrap_or(false);
            let node = &mut dom.nodes[target];
            if !node.has_value() || (inputs_only && node.tag != "input") {
                return Ok(ScriptValue::Value(json!(false)));
            }
            node.value = string(1);
            node.input_events += 1;
            Ok(ScriptValue::Value(json!(true)))
        } else if script == scripts::SET_CHECKED {
            let Some(target) = element(0) else {
                return Ok(ScriptValue::Value(json!(false)));
            };
            if dom.nodes[target].tag != "input" {
                return Ok(ScriptValue::Value(json!(false)));
            }
            dom.check(target);
            Ok(ScriptValue::Value(json!(true)))
        } else if script == scripts::SELECT_OPTION {
            let wanted = string(1);
            let Some(target) = element(0).filter(|&t| dom.nodes[t].tag == "select") else {
                return Ok(ScriptValue::Value(json!(false)));
            };
            let options = dom.nodes[target].children.clone();
            let option = options
                .iter()
                .copied()
                .find(|&o| dom.nodes[o].text == wanted)
                .or_else(|| {
                    options
                        .iter()
                        .copied()
                        .find(|&o| dom.nodes[o].attr("value") == Some(wanted.as_str()))
                });
            match option {
                Some(option) => {
                    dom.choose_option(target, option);
                    Ok(ScriptValue::Value(json!(true)))
                }
                None => Ok(ScriptValue::Value(json!(false))),
            }
        } else if script == scripts::PAGE_STRUCTURE {
            let tags: Vec<String> = args
                .first()
                .and_then(ScriptArg::as_value)
                .and_then(Value::as_array)
                .map(|a| a.iter().filter_map(Value::as_str).map(str::to_string).collect())
                .unwrap_or_default();
            let all = dom.light_dom(self.doc);
            let shadow_hosts = all.iter().filter(|&&i| tags.contains(&dom.nodes[i].tag)).count();
            let inputs = all.iter().filter(|&&i| dom.nodes[i].tag == "input").count();
            let open: Vec<String> = all
                .iter()
                .filter(|&&i| dom.nodes[i].open_shadow().is_some())
                .map(|&i| dom.nodes[i].tag.clone())
                .collect();
            Ok(ScriptValue::Value(json!({
                "totalElements": all.len(),
                "shadowHosts": shadow_hosts,
                "inputs": inputs,
                "openHostTags": open,
            })))
        } else {
            Err(Error::script_error("unsupported script"))
        }
    }
}

fn host_filter(dom: &Dom, nodes: Vec<usize>) -> Vec<usize> {
    nodes
        .into_iter()
        .filter(|&i| dom.nodes[i].open_shadow().is_some() || dom.nodes[i].is_custom())
        .collect()
}

#[async_trait]
impl Session for FakeSession {
    type Element = FakeElement;

    async fn find(&self, by: &By) -> Result<Option<FakeElement>> {
        let hit = {
            let mut dom = self.dom.lock();
            dom.queries.push(by.to_string());
            let scope = dom.light_dom(self.doc);
            dom.find_in(&scope, by).into_iter().next()
        };
        Ok(hit.map(|i| self.element(i)))
    }

    async fn find_all(&self, by: &By) -> Result<Vec<FakeElement>> {
        let hits = {
            let dom = self.dom.lock();
            let scope = dom.light_dom(self.doc);
            dom.find_in(&scope, by)
        };
        Ok(hits.into_iter().map(|i| self.element(i)).collect())
    }

    async fn execute(
        &self,
        script: &str,
        args: Vec<ScriptArg<FakeElement>>,
    ) -> Result<ScriptValue<FakeElement>> {
        self.run_script(script, &args)
    }

    async fn frame_count(&self) -> Result<usize> {
        Ok(self.dom.lock().documents[self.doc].frames.len())
    }

    async fn frame(&self, index: usize) -> Result<Self> {
        let dom = self.dom.lock();
        let doc = *dom.documents[self.doc]
            .frames
            .get(index)
            .ok_or_else(|| Error::frame_switch_failed(format!("no frame at index {index}")))?;
        if dom.documents[doc].inaccessible {
            return Err(Error::frame_switch_failed(format!("frame {index} is cross-origin")));
        }
        Ok(Self {
            dom: Arc::clone(&self.dom),
            doc,
        })
    }

    async fn main_frame(&self) -> Result<Self> {
        if self.dom.lock().main_frame_broken {
            return Err(Error::ConnectionClosed);
        }
        Ok(Self {
            dom: Arc::clone(&self.dom),
            doc: 0,
        })
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let image: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(2, 2, Rgb([255, 0, 0]));
        let mut bytes = Cursor::new(Vec::new());
        image.write_to(&mut bytes, ImageFormat::Png)?;
        Ok(bytes.into_inner())
    }
}
