//! Drawing surfaces the diagrams render onto.
//!
//! A [`DrawingSurface`] stands for the host element a diagram lives in: it
//! reports an optional client size and holds the mounted SVG document. Hosts
//! keep their surfaces in a [`SurfaceRegistry`] and pass it explicitly to
//! [`render`](crate::render).

use std::{cell::RefCell, collections::HashMap, rc::Rc};

use log::debug;
use svg::Document;

use crate::geometry::Size;

/// Surface shared between the host and the diagram mounted on it.
pub type SharedSurface = Rc<RefCell<DrawingSurface>>;

/// A single drawing surface.
#[derive(Debug)]
pub struct DrawingSurface {
    id: String,
    client_size: Option<Size>,
    document: Option<Document>,
    generation: u64,
}

impl DrawingSurface {
    /// Creates a surface with a known client size.
    pub fn new(id: impl Into<String>, client_size: Size) -> Self {
        Self {
            id: id.into(),
            client_size: Some(client_size),
            document: None,
            generation: 0,
        }
    }

    /// Creates a surface that does not report its size.
    pub fn without_size(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            client_size: None,
            document: None,
            generation: 0,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn client_size(&self) -> Option<Size> {
        self.client_size
    }

    /// Client size, or `fallback` when the surface is unsized or empty.
    pub fn size_or(&self, fallback: Size) -> Size {
        match self.client_size {
            Some(size) if size.width() > 0.0 && size.height() > 0.0 => size,
            _ => fallback,
        }
    }

    pub fn set_client_size(&mut self, size: Size) {
        self.client_size = Some(size);
    }

    /// Counter bumped on every [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Removes any mounted content and invalidates previous diagrams.
    pub fn clear(&mut self) {
        self.document = None;
        self.generation += 1;
        debug!(surface_id = self.id.as_str(), generation = self.generation; "Surface cleared");
    }

    pub fn mount(&mut self, document: Document) {
        self.document = Some(document);
    }

    pub fn is_empty(&self) -> bool {
        self.document.is_none()
    }

    /// Current content as SVG markup, if any.
    pub fn markup(&self) -> Option<String> {
        self.document.as_ref().map(ToString::to_string)
    }
}

/// Surfaces addressable by identifier.
#[derive(Debug, Default)]
pub struct SurfaceRegistry {
    surfaces: HashMap<String, SharedSurface>,
}

impl SurfaceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `surface`, replacing any surface with the same id, and
    /// returns the shared handle.
    pub fn insert(&mut self, surface: DrawingSurface) -> SharedSurface {
        let shared = Rc::new(RefCell::new(surface));
        let id = shared.borrow().id().to_string();
        self.surfaces.insert(id, Rc::clone(&shared));
        shared
    }

    pub fn get(&self, id: &str) -> Option<SharedSurface> {
        self.surfaces.get(id).cloned()
    }

    pub fn remove(&mut self, id: &str) -> Option<SharedSurface> {
        self.surfaces.remove(id)
    }

    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }
}
