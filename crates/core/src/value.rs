//! Dual-representation value cells
//!
//! A `ValueCell` holds one logical value in up to two forms: canonical text
//! and a cached typed representation governed by a type descriptor. The
//! representation state is an explicit enum, so a cell can never be empty:
//!
//! ```text
//!   TextOnly ──typed()──▶ Both ◀──text()── TypedOnly
//!       ▲                  │                   ▲
//!       └──set_text()──────┴────set_typed()────┘
//! ```
//!
//! `Value` is the handle the host passes around. Handles are reference
//! counted; cloning a handle aliases the cell. Any state change through a
//! handle goes through `Rc::get_mut`, which only succeeds while the handle is
//! the sole owner. Shared handles are moved onto a private cell first
//! (copy-on-write), so aliases never observe each other's changes.

use crate::error::ValueError;
use crate::objtype::ObjType;
use std::fmt;
use std::mem;
use std::rc::Rc;
use tracing::{trace, warn};

/// Which representations a cell currently holds
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepState {
    TextOnly,
    TypedOnly,
    Both,
}

enum Rep<T> {
    Text(Box<str>),
    Typed(T),
    Both { text: Box<str>, typed: T },
}

impl<T> Rep<T> {
    fn text(&self) -> Option<&str> {
        match self {
            Rep::Text(text) | Rep::Both { text, .. } => Some(&**text),
            Rep::Typed(_) => None,
        }
    }

    fn typed(&self) -> Option<&T> {
        match self {
            Rep::Typed(typed) | Rep::Both { typed, .. } => Some(typed),
            Rep::Text(_) => None,
        }
    }

    fn into_typed(self) -> Option<T> {
        match self {
            Rep::Typed(typed) | Rep::Both { typed, .. } => Some(typed),
            Rep::Text(_) => None,
        }
    }
}

/// A value with a text form, a typed form, or both
pub struct ValueCell<D: ObjType> {
    rep: Rep<D::Internal>,
}

impl<D: ObjType> ValueCell<D> {
    /// Create a text-only cell; parsing is deferred until first typed access
    pub fn from_text(text: impl Into<Box<str>>) -> Self {
        ValueCell {
            rep: Rep::Text(text.into()),
        }
    }

    /// Create a typed-only cell; formatting is deferred until first text access
    pub fn from_typed(typed: D::Internal) -> Self {
        ValueCell {
            rep: Rep::Typed(typed),
        }
    }

    pub fn state(&self) -> RepState {
        match self.rep {
            Rep::Text(_) => RepState::TextOnly,
            Rep::Typed(_) => RepState::TypedOnly,
            Rep::Both { .. } => RepState::Both,
        }
    }

    /// Descriptor name, if a typed representation is attached
    pub fn type_name(&self) -> Option<&'static str> {
        self.rep.typed().map(|_| D::NAME)
    }

    pub fn cached_text(&self) -> Option<&str> {
        self.rep.text()
    }

    pub fn cached_typed(&self) -> Option<&D::Internal> {
        self.rep.typed()
    }

    /// Get the typed representation, parsing the text on first access.
    ///
    /// On a parse failure the cell is left text-only and unchanged.
    pub fn typed(&mut self) -> Result<&D::Internal, ValueError> {
        if self.rep.typed().is_none() {
            let typed = D::set_from_any(self.expect_text())?;
            trace!(type_name = D::NAME, "cached typed representation");
            self.rep = match self.take_rep() {
                Rep::Text(text) => Rep::Both { text, typed },
                other => other,
            };
        }
        Ok(self.expect_typed())
    }

    /// Get the text representation, formatting the typed value on first access
    pub fn text(&mut self) -> &str {
        if self.rep.text().is_none() {
            self.rep = match self.take_rep() {
                Rep::Typed(typed) => {
                    let text = D::update_string(&typed).into_boxed_str();
                    trace!(
                        type_name = D::NAME,
                        len = text.len(),
                        "cached text representation"
                    );
                    Rep::Both { text, typed }
                }
                other => other,
            };
        }
        self.expect_text()
    }

    /// Replace the value with a new typed representation.
    ///
    /// Releases the previous typed value and invalidates the cached text.
    pub fn set_typed(&mut self, typed: D::Internal) {
        let old = mem::replace(&mut self.rep, Rep::Typed(typed));
        if let Some(old) = old.into_typed() {
            D::free(old);
        }
    }

    /// Replace the value with plain text, dropping any typed representation
    pub fn set_text(&mut self, text: impl Into<Box<str>>) {
        let old = mem::replace(&mut self.rep, Rep::Text(text.into()));
        if let Some(old) = old.into_typed() {
            D::free(old);
        }
    }

    /// Deep copy: the typed value is duplicated through the descriptor, the
    /// text is copied verbatim
    pub fn duplicate(&self) -> Result<Self, ValueError> {
        let rep = match &self.rep {
            Rep::Text(text) => Rep::Text(text.clone()),
            Rep::Typed(typed) => Rep::Typed(D::dup(typed)?),
            Rep::Both { text, typed } => Rep::Both {
                text: text.clone(),
                typed: D::dup(typed)?,
            },
        };
        Ok(ValueCell { rep })
    }

    /// Private copy with the typed representation populated.
    ///
    /// Used when a conversion is requested through a shared handle.
    fn converted_copy(&self) -> Result<Self, ValueError> {
        match &self.rep {
            Rep::Text(text) => Ok(ValueCell {
                rep: Rep::Both {
                    typed: D::set_from_any(text)?,
                    text: text.clone(),
                },
            }),
            _ => self.duplicate(),
        }
    }

    fn take_rep(&mut self) -> Rep<D::Internal> {
        mem::replace(&mut self.rep, Rep::Text(Box::default()))
    }

    fn expect_text(&self) -> &str {
        match &self.rep {
            Rep::Text(text) | Rep::Both { text, .. } => &**text,
            Rep::Typed(_) => unreachable!("text representation was just populated"),
        }
    }

    fn expect_typed(&self) -> &D::Internal {
        match &self.rep {
            Rep::Typed(typed) | Rep::Both { typed, .. } => typed,
            Rep::Text(_) => unreachable!("typed representation was just populated"),
        }
    }
}

impl<D: ObjType> Drop for ValueCell<D> {
    fn drop(&mut self) {
        if let Some(typed) = self.take_rep().into_typed() {
            D::free(typed);
        }
    }
}

impl<D: ObjType> fmt::Debug for ValueCell<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ValueCell")
            .field("type", &D::NAME)
            .field("text", &self.cached_text())
            .field("typed", &self.cached_typed())
            .finish()
    }
}

/// Renders without touching the cache
impl<D: ObjType> fmt::Display for ValueCell<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.rep {
            Rep::Text(text) | Rep::Both { text, .. } => f.write_str(text),
            Rep::Typed(typed) => f.write_str(&D::update_string(typed)),
        }
    }
}

/// Reference-counted handle to a `ValueCell`
///
/// `Clone` aliases the cell; use `duplicate` for an independent copy.
pub struct Value<D: ObjType> {
    cell: Rc<ValueCell<D>>,
}

impl<D: ObjType> Value<D> {
    pub fn from_text(text: impl Into<Box<str>>) -> Self {
        Self::from_cell(ValueCell::from_text(text))
    }

    pub fn from_typed(typed: D::Internal) -> Self {
        Self::from_cell(ValueCell::from_typed(typed))
    }

    pub fn from_cell(cell: ValueCell<D>) -> Self {
        Value {
            cell: Rc::new(cell),
        }
    }

    /// True when more than one handle references the cell
    pub fn is_shared(&self) -> bool {
        Rc::strong_count(&self.cell) > 1
    }

    /// True when both handles alias the same cell
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.cell, &other.cell)
    }

    pub fn cell(&self) -> &ValueCell<D> {
        &self.cell
    }

    pub fn state(&self) -> RepState {
        self.cell.state()
    }

    /// New handle to an independent copy of the cell
    pub fn duplicate(&self) -> Result<Self, ValueError> {
        Ok(Self::from_cell(self.cell.duplicate()?))
    }

    /// Typed representation, parsing on first access.
    ///
    /// When the cell is shared and needs conversion, this handle is moved
    /// onto a converted private copy; other aliases keep the original cell.
    pub fn get_typed(&mut self) -> Result<&D::Internal, ValueError> {
        if self.cell.cached_typed().is_none() {
            if self.is_shared() {
                let private = self.cell.converted_copy()?;
                trace!(
                    type_name = D::NAME,
                    "converted shared value on a private copy"
                );
                self.cell = Rc::new(private);
            } else {
                self.exclusive_mut()?.typed()?;
            }
        }
        Ok(self.cell.expect_typed())
    }

    /// Text representation, formatting on first access.
    ///
    /// A shared typed-only cell is duplicated first, which may fail with
    /// `OutOfMemory`.
    pub fn get_text(&mut self) -> Result<&str, ValueError> {
        if self.cell.cached_text().is_none() {
            if self.is_shared() {
                let mut private = self.cell.duplicate()?;
                private.text();
                self.cell = Rc::new(private);
            } else {
                self.exclusive_mut()?.text();
            }
        }
        Ok(self.cell.expect_text())
    }

    /// Overwrite the value in place.
    ///
    /// Fails with `SharedMutation` when the cell is aliased; callers that may
    /// hold a shared handle go through `make_exclusive` instead.
    pub fn set_typed(&mut self, typed: D::Internal) -> Result<(), ValueError> {
        self.exclusive_mut()?.set_typed(typed);
        Ok(())
    }

    /// Overwrite with plain text, under the same exclusivity rule as `set_typed`
    pub fn set_text(&mut self, text: impl Into<Box<str>>) -> Result<(), ValueError> {
        self.exclusive_mut()?.set_text(text);
        Ok(())
    }

    /// Mutable access to the cell, duplicating it first if it is shared
    pub fn make_exclusive(&mut self) -> Result<&mut ValueCell<D>, ValueError> {
        if self.is_shared() {
            let private = self.cell.duplicate()?;
            trace!(type_name = D::NAME, "copy-on-write");
            self.cell = Rc::new(private);
        }
        self.exclusive_mut()
    }

    fn exclusive_mut(&mut self) -> Result<&mut ValueCell<D>, ValueError> {
        if self.is_shared() {
            warn!(
                type_name = D::NAME,
                refs = Rc::strong_count(&self.cell),
                "refusing to mutate a shared value"
            );
            return Err(ValueError::SharedMutation);
        }
        Rc::get_mut(&mut self.cell).ok_or(ValueError::SharedMutation)
    }
}

impl<D: ObjType> Clone for Value<D> {
    fn clone(&self) -> Self {
        Value {
            cell: Rc::clone(&self.cell),
        }
    }
}

impl<D: ObjType> fmt::Debug for Value<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.cell, f)
    }
}

impl<D: ObjType> fmt::Display for Value<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.cell, f)
    }
}

impl<D: ObjType> From<&str> for Value<D> {
    fn from(text: &str) -> Self {
        Value::from_text(text)
    }
}

impl<D: ObjType> From<String> for Value<D> {
    fn from(text: String) -> Self {
        Value::from_text(text)
    }
}
