use std::collections::HashMap;

use super::Node;
use crate::error::BindError;
use crate::tag::Tag;
use crate::value::{Bind, FieldDef, Location, RecordShape, Shape};

/// Binds properties into the fields of a struct-like value.
///
/// Keys are resolved against the field table by their longest `:`-delimited
/// prefix, so a field named `og:image` receives both `og:image` and
/// `og:image:width`. Keys no field accepts are ignored.
#[derive(Debug)]
pub(crate) struct RecordBinder {
    name: &'static str,
    /// Property name to position in `fields`.
    table: HashMap<String, usize>,
    fields: Vec<Field>,
}

#[derive(Debug)]
struct Field {
    /// Declaration index within the record.
    index: usize,
    tag: Tag,
    shape: fn() -> Shape,
    binder: Option<Node>,
}

impl RecordBinder {
    /// Build the field table. Fields register in declaration order and the
    /// first field to claim a name keeps it, including names contributed by
    /// flattened fields.
    pub(crate) fn new(shape: RecordShape) -> Self {
        let mut table = HashMap::new();
        let mut fields = Vec::new();

        let mut enclosing = vec![shape.fields];
        for (index, def, tag) in bindable_fields(shape) {
            let position = fields.len();
            for name in property_names(def, &tag, &mut enclosing) {
                table.entry(name).or_insert(position);
            }
            fields.push(Field {
                index,
                tag,
                shape: def.shape,
                binder: None,
            });
        }

        Self {
            name: shape.name,
            table,
            fields,
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Position of the field accepting `key`, trying the whole key first and
    /// then ever shorter prefixes.
    fn resolve(&self, key: &str) -> Option<usize> {
        let mut prefix = key;
        loop {
            if let Some(&position) = self.table.get(prefix) {
                return Some(position);
            }
            prefix = prefix.rsplit_once(':')?.0;
        }
    }

    pub(crate) fn set(
        &mut self,
        target: &mut dyn Bind,
        key: &str,
        value: &str,
    ) -> Result<(), BindError> {
        let Some(position) = self.resolve(key) else {
            tracing::trace!(record = self.name, key, "no field accepts property");
            return Ok(());
        };

        let record = match target.location().map_err(|err| err.at(key))? {
            Location::Record(record) => record,
            _ => return Err(BindError::invalid_location(key, "expected a record")),
        };

        let field = &mut self.fields[position];
        let slot = record
            .field(field.index)
            .ok_or_else(|| BindError::invalid_location(key, "field is not accessible"))?;
        let binder = field
            .binder
            .get_or_insert_with(|| Node::build(Some(field.tag.clone()), (field.shape)()));
        binder.set(slot, key, value)
    }
}

/// Settable fields with their descriptors, in declaration order.
fn bindable_fields(
    shape: RecordShape,
) -> impl Iterator<Item = (usize, &'static FieldDef, Tag)> {
    shape
        .fields
        .iter()
        .enumerate()
        .filter(|(_, def)| def.settable)
        .map(|(index, def)| (index, def, def.tag()))
        .filter(|(_, _, tag)| !tag.is_excluded())
}

/// Names a field registers under. A transparent field contributes the names
/// of its own record, unprefixed.
///
/// `enclosing` holds the field tables of the records being flattened; a
/// record is never flattened into itself.
fn property_names(
    def: &FieldDef,
    tag: &Tag,
    enclosing: &mut Vec<&'static [FieldDef]>,
) -> Vec<String> {
    if !tag.is_transparent() {
        return tag.names().to_vec();
    }

    let inner = match (def.shape)() {
        Shape::Record(inner) => inner,
        _ => {
            tracing::debug!(field = def.ident, "flattened field is not a record, ignoring");
            return Vec::new();
        }
    };
    if enclosing.iter().any(|fields| std::ptr::eq(*fields, inner.fields)) {
        tracing::debug!(field = def.ident, record = inner.name, "recursive flatten, ignoring");
        return Vec::new();
    }

    enclosing.push(inner.fields);
    let names = bindable_fields(inner)
        .flat_map(|(_, def, tag)| property_names(def, &tag, enclosing))
        .collect();
    enclosing.pop();
    names
}
