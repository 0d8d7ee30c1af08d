use crate::error::{DataError, Result};
use crate::record::{FieldValue, FinancialRecord};
use crate::xbrl::{XbrlTagMapper, local_name};
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use std::cmp::Reverse;
use std::collections::{BTreeMap, HashMap};

/// Minimal element tree keeping only the attributes fact selection needs.
#[derive(Debug, Default)]
struct Element {
    name: String,
    text: String,
    id: Option<String>,
    context_ref: Option<String>,
    children: Vec<Element>,
}

impl Element {
    fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Reporting period of an XBRL context.
#[derive(Debug, Default)]
struct Period {
    /// Latest `endDate` or `instant`; ISO dates order correctly as text
    end: Option<String>,
    /// Context is narrowed by a segment or scenario
    dimensional: bool,
}

/// Ordering of competing facts for one field, smallest wins: whole-entity
/// contexts before dimensional ones, then the latest period, then the
/// preferred tag.
type Priority = (bool, Reverse<Option<String>>, usize);

/// Parse XML or XBRL text into a record.
///
/// Two layouts are accepted:
///
/// - record layout, `<root><record><EPS>10</EPS>...</record></root>`: the
///   children of the root's first element are the fields;
/// - flat fact layout, `<xbrl><us-gaap:Revenues>...</us-gaap:Revenues></xbrl>`:
///   the root's own children are the fields. This layout is chosen whenever
///   one of the root's children names a known field or XBRL concept
///   (US-GAAP or SEBI `in-capmkt`).
///
/// Element names go through [`XbrlTagMapper`]. In an instance document the
/// same concept is usually reported for several contexts (current and prior
/// year, segments). Facts in a context with a segment or scenario lose to
/// whole-entity facts, later periods beat earlier ones, and only then does
/// tag preference decide. Remaining ties keep the first occurrence. Facts
/// whose `contextRef` names no context in the document are treated as having
/// no period.
///
/// EPS, Book Value Per Share and Total Debt are derived from profit, equity,
/// liabilities and share count when the document does not report them.
pub fn parse_xml(text: &str, source: &str) -> Result<FinancialRecord> {
    let root = parse_tree(text)?;
    if root.children.is_empty() {
        return Err(DataError::EmptySource("XML has no child elements".to_string()));
    }

    let mapper = XbrlTagMapper::new();
    let facts = if root.children.iter().any(|c| mapper.canonical(&c.name).is_some()) {
        &root.children
    } else {
        let first = &root.children[0];
        if first.is_leaf() { &root.children } else { &first.children }
    };
    let periods = periods(&root);

    let mut chosen: BTreeMap<String, (Priority, FieldValue)> = BTreeMap::new();
    for element in facts.iter().filter(|e| e.is_leaf()) {
        let (field, rank) = mapper.canonical(&element.name).map_or_else(
            || (element.name.clone(), usize::MAX),
            |field| (field.to_string(), mapper.rank(&element.name)),
        );
        let priority = match element.context_ref.as_deref().and_then(|id| periods.get(id)) {
            Some(period) => (period.dimensional, Reverse(period.end.clone()), rank),
            None => (false, Reverse(None), rank),
        };
        let value = FieldValue::from_cell(&element.text);

        let keep_existing = chosen
            .get(&field)
            .is_some_and(|(existing, _)| *existing <= priority);
        if !keep_existing {
            chosen.insert(field, (priority, value));
        }
    }

    Ok(chosen
        .into_iter()
        .map(|(field, (_, value))| (field, value))
        .collect::<FinancialRecord>()
        .with_source(source)
        .with_derived_fields())
}

/// Context id to period, for every `context` directly under the root.
fn periods(root: &Element) -> HashMap<&str, Period> {
    root.children
        .iter()
        .filter(|c| local_name(&c.name) == "context")
        .filter_map(|c| c.id.as_deref().map(|id| (id, period_of(c))))
        .collect()
}

fn period_of(context: &Element) -> Period {
    let mut period = Period::default();
    let mut pending = vec![context];
    while let Some(element) = pending.pop() {
        match local_name(&element.name) {
            "endDate" | "instant" => {
                let date = element.text.trim();
                if period.end.as_deref().is_none_or(|end| date > end) {
                    period.end = Some(date.to_string());
                }
            }
            "segment" | "scenario" => period.dimensional = true,
            _ => {}
        }
        pending.extend(&element.children);
    }
    period
}

fn open(start: &BytesStart<'_>) -> Result<Element> {
    let mut element = Element {
        name: String::from_utf8_lossy(start.name().as_ref()).into_owned(),
        ..Element::default()
    };

    for attr in start.attributes() {
        let attr = attr.map_err(|e| DataError::XmlParse(e.to_string()))?;
        let slot = match attr.key.local_name().as_ref() {
            b"id" => &mut element.id,
            b"contextRef" => &mut element.context_ref,
            _ => continue,
        };
        let value = attr
            .unescape_value()
            .map_err(|e| DataError::XmlParse(e.to_string()))?;
        *slot = Some(value.into_owned());
    }

    Ok(element)
}

fn parse_tree(text: &str) -> Result<Element> {
    let mut reader = Reader::from_str(text);
    reader.config_mut().trim_text(true);

    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => stack.push(open(&e)?),
            Event::Empty(e) => {
                let element = open(&e)?;
                attach(&mut stack, &mut root, element);
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let unescaped = t
                        .unescape()
                        .map_err(|e| DataError::XmlParse(e.to_string()))?;
                    current.text.push_str(&unescaped);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.text.push_str(&String::from_utf8_lossy(&c));
                }
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| DataError::XmlParse("unbalanced end tag".to_string()))?;
                attach(&mut stack, &mut root, element);
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    if !stack.is_empty() {
        return Err(DataError::XmlParse("unexpected end of document".to_string()));
    }
    root.ok_or_else(|| DataError::EmptySource("XML has no root element".to_string()))
}

fn attach(stack: &mut [Element], root: &mut Option<Element>, element: Element) {
    match stack.last_mut() {
        Some(parent) => parent.children.push(element),
        None => {
            if root.is_none() {
                *root = Some(element);
            }
        }
    }
}
