//! Declarative per-model admin configuration.

use std::fmt;

use serde::Serialize;

/// How a field is stored and edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    Char { max_length: usize },
    Text { max_length: Option<usize> },
    Slug { max_length: usize },
    Image { max_length: usize, upload_to: &'static str },
    Choice { choices: &'static [(&'static str, &'static str)] },
    ForeignKey { to: &'static str },
    DateTime,
    Boolean,
}

/// Type-erased description of a field, as exposed to clients.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FieldMeta {
    pub name: &'static str,
    pub label: &'static str,
    pub required: bool,
    #[serde(flatten)]
    pub kind: FieldKind,
}

/// A field (or related lookup) of a model managed through the admin.
pub trait AdminField: Copy + Eq + fmt::Debug + Send + Sync + 'static {
    /// Every field of the model, in declaration order.
    fn all() -> &'static [Self];

    fn name(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn kind(&self) -> FieldKind;

    fn required(&self) -> bool {
        false
    }

    fn meta(&self) -> FieldMeta {
        FieldMeta {
            name: self.name(),
            label: self.label(),
            required: self.required(),
            kind: self.kind(),
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::all().iter().copied().find(|f| f.name() == name)
    }

    /// Whether this names a field of a related model rather than a column.
    fn is_lookup(&self) -> bool {
        self.name().contains('.')
    }
}

/// A named group of fields on the edit form.
#[derive(Debug, Clone)]
pub struct Fieldset<F> {
    pub name: Option<&'static str>,
    pub fields: Vec<F>,
}

impl<F: AdminField> Fieldset<F> {
    pub fn new(name: &'static str, fields: &[F]) -> Self {
        Self {
            name: Some(name),
            fields: fields.to_vec(),
        }
    }
}

/// Child records edited in a table on the parent's edit form.
#[derive(Debug, Clone, Serialize)]
pub struct InlineAdmin {
    pub model_name: &'static str,
    pub verbose_name_plural: &'static str,
    /// Field on the child that points at the parent.
    pub fk_name: &'static str,
    pub fields: Vec<FieldMeta>,
    pub readonly_fields: Vec<&'static str>,
    /// Number of blank rows offered for new children.
    pub extra: usize,
}

impl InlineAdmin {
    pub fn tabular<C: AdminField>(
        model_name: &'static str,
        verbose_name_plural: &'static str,
        fk: C,
        fields: &[C],
    ) -> Self {
        Self {
            model_name,
            verbose_name_plural,
            fk_name: fk.name(),
            fields: fields.iter().map(AdminField::meta).collect(),
            readonly_fields: Vec::new(),
            extra: 3,
        }
    }

    pub fn readonly<C: AdminField>(mut self, fields: &[C]) -> Self {
        self.readonly_fields = fields.iter().map(AdminField::name).collect();
        self
    }

    pub fn extra(mut self, extra: usize) -> Self {
        self.extra = extra;
        self
    }

    pub fn is_readonly(&self, name: &str) -> bool {
        self.readonly_fields.contains(&name)
    }
}

/// Bulk operations offered on the change list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionKind {
    DeleteSelected,
    ApproveComments,
}

impl ActionKind {
    pub const ALL: &'static [ActionKind] = &[ActionKind::DeleteSelected, ActionKind::ApproveComments];

    pub fn name(&self) -> &'static str {
        match self {
            ActionKind::DeleteSelected => "delete_selected",
            ActionKind::ApproveComments => "approve_comments",
        }
    }

    pub fn description(&self, verbose_name_plural: &str) -> String {
        match self {
            ActionKind::DeleteSelected => format!("Delete selected {verbose_name_plural}"),
            ActionKind::ApproveComments => "Approve selected comments".to_string(),
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|a| a.name() == name)
    }
}

/// An action as listed to clients.
#[derive(Debug, Clone, Serialize)]
pub struct AdminAction {
    pub name: &'static str,
    pub description: String,
}

/// Admin configuration for one model.
///
/// Built once at startup and read on every request; nothing here mutates
/// after construction.
#[derive(Debug, Clone)]
pub struct ModelAdmin<F> {
    pub model_name: &'static str,
    pub verbose_name_plural: &'static str,
    pub list_display: Vec<F>,
    pub list_filter: Vec<F>,
    pub search_fields: Vec<F>,
    /// Target field and the fields its value is derived from.
    pub prepopulated_fields: Vec<(F, Vec<F>)>,
    pub fieldsets: Vec<Fieldset<F>>,
    pub readonly_fields: Vec<F>,
    pub date_hierarchy: Option<F>,
    pub inlines: Vec<InlineAdmin>,
    pub actions: Vec<ActionKind>,
    pub list_per_page: u64,
}

impl<F: AdminField> ModelAdmin<F> {
    pub fn new(model_name: &'static str, verbose_name_plural: &'static str) -> Self {
        Self {
            model_name,
            verbose_name_plural,
            list_display: Vec::new(),
            list_filter: Vec::new(),
            search_fields: Vec::new(),
            prepopulated_fields: Vec::new(),
            fieldsets: Vec::new(),
            readonly_fields: Vec::new(),
            date_hierarchy: None,
            inlines: Vec::new(),
            actions: vec![ActionKind::DeleteSelected],
            list_per_page: 100,
        }
    }

    pub fn list_display(mut self, fields: &[F]) -> Self {
        self.list_display = fields.to_vec();
        self
    }

    pub fn list_filter(mut self, fields: &[F]) -> Self {
        self.list_filter = fields.to_vec();
        self
    }

    pub fn search_fields(mut self, fields: &[F]) -> Self {
        self.search_fields = fields.to_vec();
        self
    }

    pub fn prepopulate(mut self, target: F, sources: &[F]) -> Self {
        self.prepopulated_fields.push((target, sources.to_vec()));
        self
    }

    pub fn fieldset(mut self, fieldset: Fieldset<F>) -> Self {
        self.fieldsets.push(fieldset);
        self
    }

    pub fn readonly_fields(mut self, fields: &[F]) -> Self {
        self.readonly_fields = fields.to_vec();
        self
    }

    pub fn date_hierarchy(mut self, field: F) -> Self {
        self.date_hierarchy = Some(field);
        self
    }

    pub fn inline(mut self, inline: InlineAdmin) -> Self {
        self.inlines.push(inline);
        self
    }

    pub fn action(mut self, action: ActionKind) -> Self {
        if !self.actions.contains(&action) {
            self.actions.push(action);
        }
        self
    }

    pub fn is_readonly(&self, field: F) -> bool {
        self.readonly_fields.contains(&field)
    }

    /// Look up a declared action by name.
    pub fn find_action(&self, name: &str) -> Option<ActionKind> {
        ActionKind::from_name(name).filter(|a| self.actions.contains(a))
    }

    pub fn action_list(&self) -> Vec<AdminAction> {
        self.actions
            .iter()
            .map(|a| AdminAction {
                name: a.name(),
                description: a.description(self.verbose_name_plural),
            })
            .collect()
    }

    pub fn columns(&self) -> Vec<FieldMeta> {
        self.list_display.iter().map(AdminField::meta).collect()
    }

    /// Derive a value for a prepopulated `target` from its source fields.
    ///
    /// Source values are joined with a space and passed to `derive`. Returns
    /// `None` when `target` is not prepopulated or all sources are blank.
    pub fn prepopulated_value(
        &self,
        target: F,
        value_of: impl Fn(F) -> String,
        derive: impl Fn(&str) -> String,
    ) -> Option<String> {
        let (_, sources) = self.prepopulated_fields.iter().find(|(t, _)| *t == target)?;
        let joined = sources
            .iter()
            .map(|f| value_of(*f))
            .filter(|v| !v.trim().is_empty())
            .collect::<Vec<_>>()
            .join(" ");
        if joined.is_empty() {
            None
        } else {
            Some(derive(&joined))
        }
    }
}
