//! Per-type delta unit.
//!
//! A unit holds items only. It is included into `<model module>::<deltas>`,
//! whose manifest glob-imports the model module, so property types are
//! written exactly as the model declares them. Support types and nested
//! delta types are always reached through absolute paths.
//!
//! Every property gets a lazily filled slot. Plain properties hold a
//! `PropertyDelta<T>`; nested tracked properties hold a boxed delta of the
//! nested type, which keeps self-referential delta types finitely sized and
//! defers building a nested delta until it is first asked for.

use deltagen_ir::{PropertyDescriptor, TrackedTypeDescriptor, Wrapper};

use super::writer::CodeWriter;
use crate::options::EmitOptions;
use crate::output::{OutputUnit, UnitKind};

const OPTION: &str = "::core::option::Option";
const SOME: &str = "::core::option::Option::Some";
const ONCE_CELL: &str = "::core::cell::OnceCell";
const BOX: &str = "::std::boxed::Box";
const ITER: &str = "::core::iter";

/// File name of a tracked type's unit.
pub fn delta_unit_file_name(generated_name: &str) -> String {
    format!("{generated_name}.g.rs")
}

/// Emit the delta unit for one graph node.
///
/// The text depends only on the node and the options: equal inputs give
/// byte-identical output.
#[tracing::instrument(level = "debug", skip_all, fields(identity = %node.identity))]
pub fn emit_delta_unit(node: &TrackedTypeDescriptor, options: &EmitOptions) -> OutputUnit {
    let unit = DeltaUnit::new(node, options);
    let mut w = CodeWriter::with_capacity(4096);

    w.line(&format!(
        "// @generated by deltagen from `{}`. Do not edit.",
        node.identity
    ));
    w.blank();
    unit.emit_struct(&mut w);
    w.blank();
    unit.emit_inherent_impl(&mut w);
    w.blank();
    unit.emit_trait_impls(&mut w);
    if node.config.convenience_functions {
        w.blank();
        unit.emit_extension_trait(&mut w);
    }

    OutputUnit {
        file_name: delta_unit_file_name(&node.generated_name),
        kind: UnitKind::Delta,
        subject: node.identity.to_string(),
        text: w.finish(),
    }
}

struct DeltaUnit<'a> {
    node: &'a TrackedTypeDescriptor,
    /// `crate::delta_support`
    support: &'a str,
    /// `super::Model`
    model: String,
    /// `ModelDelta`
    name: &'a str,
    vis: &'static str,
}

impl<'a> DeltaUnit<'a> {
    fn new(node: &'a TrackedTypeDescriptor, options: &'a EmitOptions) -> Self {
        DeltaUnit {
            node,
            support: &options.support_path,
            model: format!("super::{}", node.type_name()),
            name: &node.generated_name,
            vis: node.visibility.as_str(),
        }
    }

    fn properties(&self) -> impl Iterator<Item = &'a PropertyDescriptor> {
        self.node.properties.iter()
    }

    fn side_type(&self) -> String {
        format!("{OPTION}<&'a {}>", self.model)
    }

    fn slot_type(&self, property: &PropertyDescriptor) -> String {
        match &property.nested {
            Some(nested) => format!("{ONCE_CELL}<{BOX}<{}<'a>>>", nested.delta_path),
            None => format!(
                "{ONCE_CELL}<{}::PropertyDelta<{}>>",
                self.support, property.declared_type.spelled
            ),
        }
    }

    fn emit_struct(&self, w: &mut CodeWriter) {
        w.line(&format!(
            "/// Field-level comparison of two [`{}`]({}) values.",
            self.node.type_name(),
            self.model
        ));
        w.line("///");
        w.line("/// Property deltas are computed on first access and cached.");
        w.open(&format!("{} struct {}<'a> {{", self.vis, self.name));
        w.line(&format!("previous: {},", self.side_type()));
        w.line(&format!("current: {},", self.side_type()));
        for property in self.properties() {
            w.line(&format!("{}: {},", property.member, self.slot_type(property)));
        }
        w.close("}");
    }

    fn emit_inherent_impl(&self, w: &mut CodeWriter) {
        w.open(&format!("impl<'a> {}<'a> {{", self.name));

        self.emit_constructor(w);
        w.blank();
        w.open(&format!("pub fn previous(&self) -> {} {{", self.side_type()));
        w.line("self.previous");
        w.close("}");
        w.blank();
        w.open(&format!("pub fn current(&self) -> {} {{", self.side_type()));
        w.line("self.current");
        w.close("}");

        for property in self.properties() {
            w.blank();
            if property.nested.is_some() {
                self.emit_nested_accessor(w, property);
            } else {
                self.emit_value_accessor(w, property);
            }
        }

        w.blank();
        self.emit_has_any_deltas(w);
        w.blank();
        self.emit_has_delta_in(w);
        w.blank();
        self.emit_all_deltas(w);
        w.blank();
        self.emit_root_deltas(w);
        w.blank();
        self.emit_deltas(w);

        w.close("}");
    }

    fn emit_constructor(&self, w: &mut CodeWriter) {
        w.line("/// Compare `previous` against `current`. Either side may be absent.");
        w.open("pub fn new(");
        w.line(&format!("previous: {},", self.side_type()));
        w.line(&format!("current: {},", self.side_type()));
        w.reopen(") -> Self {");
        w.open(&format!("{} {{", self.name));
        w.line("previous,");
        w.line("current,");
        for property in self.properties() {
            w.line(&format!("{}: {ONCE_CELL}::new(),", property.member));
        }
        w.close("}");
        w.close("}");
    }

    fn emit_value_accessor(&self, w: &mut CodeWriter, property: &PropertyDescriptor) {
        let field = &property.field;
        w.line(&format!("/// Delta of `{}`.", property.name));
        w.open(&format!(
            "pub fn {}(&self) -> &{}::PropertyDelta<{}> {{",
            property.member, self.support, property.declared_type.spelled
        ));
        w.open(&format!("self.{}.get_or_init(|| {{", property.member));
        w.open(&format!("{}::PropertyDelta::new(", self.support));
        w.line(&format!(
            "self.previous.map(|model| model.{field}.clone()).unwrap_or_default(),"
        ));
        w.line(&format!(
            "self.current.map(|model| model.{field}.clone()).unwrap_or_default(),"
        ));
        w.close(")");
        w.close("})");
        w.close("}");
    }

    fn emit_nested_accessor(&self, w: &mut CodeWriter, property: &PropertyDescriptor) {
        let Some(nested) = &property.nested else {
            return;
        };
        w.line(&format!("/// Nested delta of `{}`.", property.name));
        w.open(&format!(
            "pub fn {}(&self) -> &{}<'a> {{",
            property.member, nested.delta_path
        ));
        w.open(&format!("self.{}.get_or_init(|| {{", property.member));
        w.open(&format!("{BOX}::new({}::new(", nested.delta_path));
        w.line(&format!("{},", projection("self.previous", property)));
        w.line(&format!("{},", projection("self.current", property)));
        w.close("))");
        w.close("})");
        w.close("}");
    }

    fn emit_has_any_deltas(&self, w: &mut CodeWriter) {
        w.line("/// True if any tracked property, at any depth, differs.");
        w.open("pub fn has_any_deltas(&self) -> bool {");
        let checks: Vec<String> = self
            .properties()
            .map(|property| {
                if property.nested.is_some() {
                    format!("self.{}().has_any_deltas()", property.member)
                } else {
                    format!("self.{}().has_changed()", property.member)
                }
            })
            .collect();
        if checks.is_empty() {
            w.line("false");
        } else {
            emit_absent_guard(w, "false");
            let mut lines = checks.iter();
            if let Some(first) = lines.next() {
                w.line(first);
            }
            for check in lines {
                w.line(&format!("    || {check}"));
            }
        }
        w.close("}");
    }

    fn emit_has_delta_in(&self, w: &mut CodeWriter) {
        w.line("/// Whether the property picked by `selector` has changed.");
        w.line("///");
        w.line("/// The selector may return a property delta or a nested delta.");
        w.line("pub fn has_delta_in<S>(&self, selector: impl ::core::ops::FnOnce(&Self) -> &S) -> bool");
        w.line("where");
        w.line(&format!("    S: {}::HasDelta + ?Sized,", self.support));
        w.open("{");
        w.line(&format!("{}::HasDelta::has_delta(selector(self))", self.support));
        w.close("}");
    }

    fn emit_all_deltas(&self, w: &mut CodeWriter) {
        w.line("/// Every changed leaf property, nested paths flattened.");
        self.emit_iterator(w, "all_deltas", "DeltaInfo", |property| {
            if property.nested.is_some() {
                vec![
                    ".flat_map(|delta| delta.all_deltas())".to_string(),
                    format!(".map(|info| info.with_prefix({:?}))", property.name),
                ]
            } else {
                vec![
                    ".filter(|delta| delta.has_changed())".to_string(),
                    format!(".map(|delta| delta.to_delta_info({:?}))", property.name),
                ]
            }
        });
    }

    fn emit_root_deltas(&self, w: &mut CodeWriter) {
        w.line("/// Changed top-level properties; a changed nested property is one entry.");
        let support = self.support;
        self.emit_iterator(w, "root_deltas", "DeltaInfo", |property| {
            if property.nested.is_some() {
                vec![
                    ".filter(|delta| delta.has_any_deltas())".to_string(),
                    format!(
                        ".map(move |_| {support}::DeltaInfo::new({:?}, {support}::ErasedValue::new({}.cloned()), {support}::ErasedValue::new({}.cloned()), ::core::any::type_name::<{}>()))",
                        property.name,
                        projection("self.previous", property),
                        projection("self.current", property),
                        property.declared_type.spelled
                    ),
                ]
            } else {
                vec![
                    ".filter(|delta| delta.has_changed())".to_string(),
                    format!(".map(|delta| delta.to_delta_info({:?}))", property.name),
                ]
            }
        });
    }

    fn emit_deltas(&self, w: &mut CodeWriter) {
        w.line("/// Every changed leaf property as a `PropertyChange`.");
        self.emit_iterator(w, "deltas", "PropertyChange", |property| {
            if property.nested.is_some() {
                vec![
                    ".flat_map(|delta| delta.deltas())".to_string(),
                    format!(".map(|change| change.with_prefix({:?}))", property.name),
                ]
            } else {
                vec![
                    ".filter(|delta| delta.has_changed())".to_string(),
                    format!(".map(|delta| delta.to_change({:?}))", property.name),
                ]
            }
        });
    }

    /// Emit a lazy iterator method chaining one stage per property.
    ///
    /// Each stage starts from `once_with` so no property delta is computed
    /// before the iterator reaches it.
    fn emit_iterator(
        &self,
        w: &mut CodeWriter,
        method: &str,
        item: &str,
        stage: impl Fn(&PropertyDescriptor) -> Vec<String>,
    ) {
        let item = format!("{}::{item}", self.support);
        w.open(&format!(
            "pub fn {method}(&self) -> {BOX}<dyn ::core::iter::Iterator<Item = {item}> + '_> {{"
        ));
        if self.node.properties.is_empty() {
            w.line(&format!("{BOX}::new({ITER}::empty::<{item}>())"));
            w.close("}");
            return;
        }
        emit_absent_guard(w, &format!("{BOX}::new({ITER}::empty::<{item}>())"));
        w.open(&format!("{BOX}::new("));
        w.line(&format!("{ITER}::empty::<{item}>()"));
        w.indent();
        for property in self.properties() {
            w.open(".chain(");
            w.line(&format!(
                "{ITER}::once_with(move || self.{}())",
                property.member
            ));
            w.indent();
            for adapter in stage(property) {
                w.line(&adapter);
            }
            w.dedent();
            w.close(")");
        }
        w.dedent();
        w.close(")");
        w.close("}");
    }

    fn emit_trait_impls(&self, w: &mut CodeWriter) {
        let support = self.support;
        w.open(&format!(
            "impl {support}::DeltaTracker for {}<'_> {{",
            self.name
        ));
        w.open("fn has_any_deltas(&self) -> bool {");
        w.line(&format!("{}::has_any_deltas(self)", self.name));
        w.close("}");
        w.blank();
        w.open(&format!(
            "fn all_deltas(&self) -> {BOX}<dyn ::core::iter::Iterator<Item = {support}::DeltaInfo> + '_> {{"
        ));
        w.line(&format!("{}::all_deltas(self)", self.name));
        w.close("}");
        w.close("}");
        w.blank();
        w.open(&format!("impl {support}::HasDelta for {}<'_> {{", self.name));
        w.open("fn has_delta(&self) -> bool {");
        w.line(&format!("{}::has_any_deltas(self)", self.name));
        w.close("}");
        w.close("}");
    }

    fn emit_extension_trait(&self, w: &mut CodeWriter) {
        let trait_name = format!("{}Ext", self.name);
        let model = &self.model;
        w.line(&format!(
            "/// `delta_to` / `delta_from` for [`{}`]({model}).",
            self.node.type_name()
        ));
        w.open(&format!("{} trait {trait_name} {{", self.vis));
        w.line("/// Compare `self` (previous) against `current`.");
        w.line(&format!(
            "fn delta_to<'a>(&'a self, current: &'a {model}) -> {}<'a>;",
            self.name
        ));
        w.blank();
        w.line("/// Compare `previous` against `self` (current).");
        w.line(&format!(
            "fn delta_from<'a>(&'a self, previous: &'a {model}) -> {}<'a>;",
            self.name
        ));
        w.close("}");
        w.blank();
        w.open(&format!("impl {trait_name} for {model} {{"));
        w.open(&format!(
            "fn delta_to<'a>(&'a self, current: &'a {model}) -> {}<'a> {{",
            self.name
        ));
        w.line(&format!("{}::new({SOME}(self), {SOME}(current))", self.name));
        w.close("}");
        w.blank();
        w.open(&format!(
            "fn delta_from<'a>(&'a self, previous: &'a {model}) -> {}<'a> {{",
            self.name
        ));
        w.line(&format!("{}::new({SOME}(previous), {SOME}(self))", self.name));
        w.close("}");
        w.close("}");
    }
}

/// `Option<&Nested>` for one side, looking through the property's wrapper.
fn projection(side: &str, property: &PropertyDescriptor) -> String {
    let field = &property.field;
    match property.declared_type.wrapper {
        Wrapper::Plain => format!("{side}.map(|model| &model.{field})"),
        Wrapper::Optional => format!("{side}.and_then(|model| model.{field}.as_ref())"),
        Wrapper::Boxed => format!("{side}.map(|model| &*model.{field})"),
        Wrapper::OptionalBoxed => format!("{side}.and_then(|model| model.{field}.as_deref())"),
    }
}

/// Both sides absent: nothing to compare, and nothing to recurse into.
fn emit_absent_guard(w: &mut CodeWriter, result: &str) {
    w.open("if self.previous.is_none() && self.current.is_none() {");
    w.line(&format!("return {result};"));
    w.close("}");
}
