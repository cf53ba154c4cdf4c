//! Scene graph: the ordered element list over the monument image.

use serde::{Deserialize, Serialize};

use crate::geometry::{self, Point};
use crate::{ConstructorError, ConstructorResult, Element, ElementId, FontSpec};

/// Default canvas width in canvas-local units (3:4 aspect).
pub const DEFAULT_CANVAS_WIDTH: f32 = 450.0;
/// Default canvas height in canvas-local units.
pub const DEFAULT_CANVAS_HEIGHT: f32 = 600.0;

/// A design scene: background monument image, ordered elements (later
/// elements paint on top), and the current view state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scene {
    /// Background monument image reference.
    pub monument_image: String,
    /// Elements in z-order (index 0 at the bottom).
    elements: Vec<Element>,
    /// Canvas width in canvas-local units.
    pub canvas_width: f32,
    /// Canvas height in canvas-local units.
    pub canvas_height: f32,
    /// Current zoom level (1.0 = 100%).
    pub zoom: f32,
    /// Pan offset X, screen pixels.
    pub pan_x: f32,
    /// Pan offset Y, screen pixels.
    pub pan_y: f32,
}

impl Scene {
    /// Create an empty scene over the given monument image.
    #[must_use]
    pub fn new(monument_image: impl Into<String>) -> Self {
        Self {
            monument_image: monument_image.into(),
            elements: Vec::new(),
            canvas_width: DEFAULT_CANVAS_WIDTH,
            canvas_height: DEFAULT_CANVAS_HEIGHT,
            zoom: 1.0,
            pan_x: 0.0,
            pan_y: 0.0,
        }
    }

    /// Append an element; it becomes topmost. The new element is not
    /// selected - selection always requires an explicit click.
    pub fn add_element(&mut self, element: Element) -> ElementId {
        let id = element.id;
        self.elements.push(element);
        id
    }

    /// Add a plain text element.
    pub fn add_text(&mut self) -> ElementId {
        self.add_element(Element::text())
    }

    /// Add an epitaph element, optionally with custom text.
    pub fn add_epitaph(&mut self, custom_text: Option<&str>) -> ElementId {
        self.add_element(Element::epitaph(custom_text))
    }

    /// Add a FIO block from its three parts, one per line.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::InvalidOperation`] when every part is
    /// empty - the add action is meaningless without any text.
    pub fn add_fio(
        &mut self,
        surname: &str,
        name: &str,
        patronymic: &str,
        font: FontSpec,
    ) -> ConstructorResult<ElementId> {
        if surname.is_empty() && name.is_empty() && patronymic.is_empty() {
            return Err(ConstructorError::InvalidOperation(
                "FIO element requires at least one non-empty part".to_string(),
            ));
        }
        let content = format!("{surname}\n{name}\n{patronymic}").trim().to_string();
        Ok(self.add_element(Element::fio(content, font)))
    }

    /// Add a dates line (`birth — death`).
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::InvalidOperation`] when both dates are
    /// empty.
    pub fn add_dates(
        &mut self,
        birth_date: &str,
        death_date: &str,
        font: FontSpec,
    ) -> ConstructorResult<ElementId> {
        if birth_date.is_empty() && death_date.is_empty() {
            return Err(ConstructorError::InvalidOperation(
                "dates element requires at least one date".to_string(),
            ));
        }
        let content = format!("{birth_date} — {death_date}").trim().to_string();
        Ok(self.add_element(Element::dates(content, font)))
    }

    /// Add a decorative image element.
    pub fn add_image(&mut self, src: impl Into<String>) -> ElementId {
        self.add_element(Element::image(src))
    }

    /// Add a cross decoration.
    pub fn add_cross(&mut self, src: impl Into<String>) -> ElementId {
        self.add_element(Element::cross(src))
    }

    /// Add a flower decoration.
    pub fn add_flower(&mut self, src: impl Into<String>) -> ElementId {
        self.add_element(Element::flower(src))
    }

    /// Add a portrait photo element.
    pub fn add_photo(&mut self, src: impl Into<String>) -> ElementId {
        self.add_element(Element::photo(src))
    }

    /// Get an element by ID.
    #[must_use]
    pub fn element(&self, id: ElementId) -> Option<&Element> {
        self.elements.iter().find(|e| e.id == id)
    }

    /// Get a mutable reference to an element by ID.
    pub fn element_mut(&mut self, id: ElementId) -> Option<&mut Element> {
        self.elements.iter_mut().find(|e| e.id == id)
    }

    /// Mutate an element through a closure.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn update_element<F>(&mut self, id: ElementId, f: F) -> ConstructorResult<()>
    where
        F: FnOnce(&mut Element),
    {
        let element = self
            .element_mut(id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        f(element);
        Ok(())
    }

    /// Remove an element.
    ///
    /// # Errors
    ///
    /// Returns [`ConstructorError::ElementNotFound`] if the id is unknown.
    pub fn remove_element(&mut self, id: ElementId) -> ConstructorResult<Element> {
        let index = self
            .elements
            .iter()
            .position(|e| e.id == id)
            .ok_or_else(|| ConstructorError::ElementNotFound(id.to_string()))?;
        Ok(self.elements.remove(index))
    }

    /// All elements in z-order.
    #[must_use]
    pub fn elements(&self) -> &[Element] {
        &self.elements
    }

    /// Replace the whole element list (document restore).
    pub fn set_elements(&mut self, elements: Vec<Element>) {
        self.elements = elements;
    }

    /// Empty the element list; the monument image is untouched.
    pub fn clear(&mut self) {
        self.elements.clear();
    }

    /// Swap the monument background.
    pub fn set_monument_image(&mut self, monument_image: impl Into<String>) {
        self.monument_image = monument_image.into();
    }

    /// Number of elements in the scene.
    #[must_use]
    pub fn element_count(&self) -> usize {
        self.elements.len()
    }

    /// Whether the scene has no elements.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    /// Topmost element at a canvas-space point, if any.
    #[must_use]
    pub fn element_at(&self, point: Point) -> Option<ElementId> {
        geometry::hit_test(&self.elements, point)
    }

    /// Serialize the scene to JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> ConstructorResult<String> {
        serde_json::to_string(self).map_err(ConstructorError::Serialization)
    }

    /// Deserialize a scene from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if deserialization fails.
    pub fn from_json(json: &str) -> ConstructorResult<Self> {
        serde_json::from_str(json).map_err(ConstructorError::Serialization)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ElementKind;

    fn test_scene() -> Scene {
        Scene::new("monument.jpg")
    }

    #[test]
    fn add_and_remove() {
        let mut scene = test_scene();
        assert!(scene.is_empty());

        let id = scene.add_text();
        assert_eq!(scene.element_count(), 1);
        assert!(scene.element(id).is_some());

        scene.remove_element(id).expect("should remove");
        assert!(scene.is_empty());
    }

    #[test]
    fn insertion_order_is_z_order() {
        let mut scene = test_scene();
        let first = scene.add_text();
        let second = scene.add_epitaph(None);
        let ids: Vec<_> = scene.elements().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![first, second]);
    }

    #[test]
    fn fio_builds_three_line_content() {
        let mut scene = test_scene();
        let font = FontSpec::new("Playfair Display", "400");
        let id = scene
            .add_fio("Иванов", "Иван", "Иванович", font)
            .expect("should add");

        let element = scene.element(id).expect("element exists");
        let text = element.kind.text().expect("text attrs");
        assert_eq!(text.content, "Иванов\nИван\nИванович");
        assert!(text.font.as_str().contains("Playfair Display"));
        assert_eq!(text.font.weight(), "400");
    }

    #[test]
    fn empty_fio_is_rejected() {
        let mut scene = test_scene();
        let result = scene.add_fio("", "", "", FontSpec::default());
        assert!(matches!(
            result,
            Err(ConstructorError::InvalidOperation(_))
        ));
        assert!(scene.is_empty());
    }

    #[test]
    fn dates_joined_with_dash() {
        let mut scene = test_scene();
        let id = scene
            .add_dates("12.03.1941", "08.11.2020", FontSpec::default())
            .expect("should add");
        let text = scene.element(id).expect("exists").kind.text().expect("text");
        assert_eq!(text.content, "12.03.1941 — 08.11.2020");
        assert!(matches!(
            scene.element(id).expect("exists").kind,
            ElementKind::Dates(_)
        ));
    }

    #[test]
    fn clear_keeps_monument_image() {
        let mut scene = test_scene();
        scene.add_text();
        scene.clear();
        assert!(scene.is_empty());
        assert_eq!(scene.monument_image, "monument.jpg");
    }

    #[test]
    fn update_missing_element_fails() {
        let mut scene = test_scene();
        let result = scene.update_element(ElementId::new(), |_| {});
        assert!(matches!(result, Err(ConstructorError::ElementNotFound(_))));
    }
}
