//! Admin console configuration.
//!
//! Each model is described by a [`ModelAdmin`] over its field enum: which
//! columns are listed, which fields filter and search, how the edit form is
//! grouped, and which bulk actions exist. The generic code in this module
//! interprets that configuration; infrastructure executes the resulting
//! queries.

mod changelist;
mod fields;
mod form;
mod hierarchy;
mod inline;
mod options;
mod query;
mod site;

pub use changelist::{ChangeList, CommentRow, ListRow, PostRow};
pub use fields::{CommentField, PostField};
pub use form::{
    ChangeForm, FormRecord, InlineRow, RenderedField, RenderedFieldset, RenderedInline,
    render_inline,
};
pub use hierarchy::{DateBucket, DateHierarchy, DateLevel};
pub use inline::{InlineChange, validate_inlines};
pub use options::{
    ActionKind, AdminAction, AdminField, FieldKind, FieldMeta, Fieldset, InlineAdmin, ModelAdmin,
};
pub use query::{
    ChangeListQuery, DateDrilldown, DateFilter, DateRange, FilterValue, ListFilter,
    split_search_terms,
};
pub use site::{AdminSite, RegisteredModel, comment_admin, post_admin};
