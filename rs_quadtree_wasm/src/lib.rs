// rs_quadtree_wasm/src/lib.rs
// This is the public API for the wasm wrapper of the quadtree library.

use js_sys::Float64Array;
use wasm_bindgen::prelude::*;
use rs_quadtree::forces::{BarnesHut, CoulombRepulsion};
use rs_quadtree::index::QuadTree;
use rs_quadtree::layout::ForceLayout;
use rs_quadtree::models::Point;
use rs_quadtree::utils::{LayoutConfig, QuadTreeError};

fn to_js(error: QuadTreeError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Flattens points into `[x0, y0, x1, y1, ...]`.
fn flatten(points: impl IntoIterator<Item = Point>) -> Float64Array {
    let coordinates: Vec<f64> = points.into_iter().flat_map(|p| [p.x, p.y]).collect();
    Float64Array::from(coordinates.as_slice())
}

/// A spatial index of `u32` handles, as seen from JavaScript.
#[wasm_bindgen]
pub struct WasmQuadTree {
    tree: QuadTree<u32>,
}

#[wasm_bindgen]
impl WasmQuadTree {
    #[wasm_bindgen(constructor)]
    pub fn new(max_elements_per_leaf: usize, center_x: f64, center_y: f64, width: f64, height: f64) -> Result<WasmQuadTree, JsValue> {
        QuadTree::new(max_elements_per_leaf, Point::new(center_x, center_y), width, height)
            .map(|tree| WasmQuadTree { tree })
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn insert(&mut self, x: f64, y: f64, object: u32) -> bool {
        let inserted = self.tree.insert(Point::new(x, y), object);
        if !inserted {
            web_sys::console::warn_1(&format!("object {} at ({}, {}) is outside the index", object, x, y).into());
        }
        inserted
    }

    #[wasm_bindgen]
    pub fn remove(&mut self, x: f64, y: f64, object: u32) -> bool {
        self.tree.remove(&Point::new(x, y), &object)
    }

    #[wasm_bindgen]
    pub fn update(&mut self, old_x: f64, old_y: f64, new_x: f64, new_y: f64, object: u32, force_insertion: bool) -> bool {
        self.tree.update(Point::new(old_x, old_y), Point::new(new_x, new_y), object, force_insertion)
    }

    #[wasm_bindgen]
    pub fn query(&self, center_x: f64, center_y: f64, width: f64, height: f64) -> Vec<u32> {
        self.tree.query(&Point::new(center_x, center_y), width, height).into_iter().copied().collect()
    }

    #[wasm_bindgen]
    pub fn query_circle(&self, center_x: f64, center_y: f64, radius: f64) -> Vec<u32> {
        self.tree.query_circle(&Point::new(center_x, center_y), radius).into_iter().copied().collect()
    }

    #[wasm_bindgen]
    pub fn query_points_with_circle(&self, center_x: f64, center_y: f64, radius: f64) -> Float64Array {
        flatten(self.tree.query_points_with_circle(&Point::new(center_x, center_y), radius))
    }

    #[wasm_bindgen(getter)]
    pub fn size(&self) -> usize {
        self.tree.len()
    }

    #[wasm_bindgen]
    pub fn gravity_center(&self) -> Float64Array {
        flatten([self.tree.gravity_center()])
    }

    /// Coulomb repulsion on `object` at `(x, y)` with the default layout
    /// constants, approximated with threshold `theta`.
    #[wasm_bindgen]
    pub fn approximate_repulsion(&self, object: u32, x: f64, y: f64, theta: f64) -> Result<Float64Array, JsValue> {
        let barnes_hut = BarnesHut::new(theta).map_err(to_js)?;
        let law = CoulombRepulsion::from(&LayoutConfig::default());
        let force = barnes_hut.approximate_force(&object, Point::new(x, y), 1.0, &self.tree, &law);
        Ok(flatten([force]))
    }
}

/// A force-directed graph layout, as seen from JavaScript.
#[wasm_bindgen]
pub struct WasmForceLayout {
    layout: ForceLayout,
}

#[wasm_bindgen]
impl WasmForceLayout {
    #[wasm_bindgen(constructor)]
    pub fn new(center_x: f64, center_y: f64, width: f64, height: f64) -> Result<WasmForceLayout, JsValue> {
        ForceLayout::new(LayoutConfig::default(), Point::new(center_x, center_y), width, height)
            .map(|layout| WasmForceLayout { layout })
            .map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_vertex(&mut self, x: f64, y: f64) -> Result<usize, JsValue> {
        self.layout.add_vertex(Point::new(x, y)).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn remove_vertex(&mut self, id: usize) -> Result<(), JsValue> {
        self.layout.remove_vertex(id).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn add_edge(&mut self, a: usize, b: usize) -> Result<(), JsValue> {
        self.layout.add_edge(a, b).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn simulate(&mut self, steps: usize) -> Result<(), JsValue> {
        self.layout.simulate(steps).map_err(to_js)
    }

    #[wasm_bindgen]
    pub fn position(&self, id: usize) -> Result<Float64Array, JsValue> {
        self.layout.position(id).map(|p| flatten([p])).map_err(to_js)
    }

    /// Positions of the live vertices in increasing id order, flattened.
    #[wasm_bindgen]
    pub fn positions(&self) -> Float64Array {
        flatten(self.layout.positions().into_iter().map(|(_, p)| p))
    }

    #[wasm_bindgen(getter)]
    pub fn vertex_count(&self) -> usize {
        self.layout.vertex_count()
    }

    #[wasm_bindgen(getter)]
    pub fn kinetic_energy(&self) -> f64 {
        self.layout.kinetic_energy()
    }
}
