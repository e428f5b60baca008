//! Deferred content: models that arrive after the first frame
//!
//! OBJ files are parsed with `tobj` on a worker thread. Each finished model is
//! handed to a delivery callback as a detached [`NodeTree`]; the event loop
//! attaches it to the live scene. A model that fails to load is replaced by a
//! placeholder box of the same footprint so the scene stays usable.

use std::{
    path::{Path, PathBuf},
    thread::{self, JoinHandle},
};

use cgmath::Vector3;

use super::ContentError;
use crate::gfx::{
    geometry::{generate_cuboid, GeometryData},
    scene::{NodeTree, SceneNode, Transform},
};

const DEFAULT_DIFFUSE: [f32; 3] = [0.8, 0.8, 0.8];

/// Where a deferred model's geometry comes from
#[derive(Debug, Clone, PartialEq)]
pub enum ModelSource {
    Obj(PathBuf),
    /// A flat text sign, drawn as a slab sized to the text
    Placard { text: String, size: f32, depth: f32 },
}

/// A model to load in the background and attach once ready
#[derive(Debug, Clone)]
pub struct DeferredModel {
    /// Name of the root node, used by animation targets
    pub name: String,
    pub source: ModelSource,
    /// Placement of the root node
    pub transform: Transform,
    /// World-space size of the fallback box
    pub footprint: [f32; 3],
    pub color: [f32; 4],
}

impl DeferredModel {
    pub fn obj(name: &str, path: impl AsRef<Path>, footprint: [f32; 3]) -> Self {
        Self {
            name: name.to_string(),
            source: ModelSource::Obj(path.as_ref().to_path_buf()),
            transform: Transform::identity(),
            footprint,
            color: [0.7, 0.7, 0.7, 1.0],
        }
    }

    pub fn placard(name: &str, text: &str, size: f32, depth: f32) -> Self {
        let width = size * 0.75 * text.chars().count().max(1) as f32;
        Self {
            name: name.to_string(),
            source: ModelSource::Placard {
                text: text.to_string(),
                size,
                depth,
            },
            transform: Transform::identity(),
            footprint: [width, size, depth],
            color: [1.0, 1.0, 1.0, 1.0],
        }
    }

    pub fn at(mut self, x: f32, y: f32, z: f32) -> Self {
        self.transform.position = Vector3::new(x, y, z);
        self
    }

    pub fn rotated_y(mut self, angle: f32) -> Self {
        self.transform.rotation.y = cgmath::Rad(angle);
        self
    }

    pub fn scaled(mut self, scale: f32) -> Self {
        self.transform.scale = Vector3::new(scale, scale, scale);
        self
    }

    pub fn colored(mut self, color: [f32; 4]) -> Self {
        self.color = color;
        self
    }
}

/// Load one model into a detached tree rooted at a node named after it
pub fn load(model: &DeferredModel) -> Result<NodeTree, ContentError> {
    match &model.source {
        ModelSource::Obj(path) => load_obj(model, path),
        ModelSource::Placard { text, .. } => {
            log::debug!("built placard {} for '{}'", model.name, text);
            Ok(slab(model))
        }
    }
}

/// [`load`], falling back to a placeholder box on failure
pub fn load_or_placeholder(model: &DeferredModel) -> NodeTree {
    match load(model) {
        Ok(tree) => tree,
        Err(err) => {
            log::warn!("{err}; using placeholder for {}", model.name);
            slab(model)
        }
    }
}

/// Load `models` on a worker thread, delivering each as it finishes
///
/// `deliver` returns `false` once nobody is listening any more, which stops
/// the worker early.
pub fn spawn_loader<F>(models: Vec<DeferredModel>, deliver: F) -> Result<JoinHandle<()>, ContentError>
where
    F: Fn(NodeTree) -> bool + Send + 'static,
{
    thread::Builder::new()
        .name("content-loader".to_string())
        .spawn(move || {
            for model in &models {
                if !deliver(load_or_placeholder(model)) {
                    log::debug!("content receiver gone, stopping loader");
                    break;
                }
            }
        })
        .map_err(ContentError::Spawn)
}

fn load_obj(model: &DeferredModel, path: &Path) -> Result<NodeTree, ContentError> {
    let (models, materials) = tobj::load_obj(
        path,
        &tobj::LoadOptions {
            triangulate: true,
            single_index: true,
            ..Default::default()
        },
    )
    .map_err(|source| ContentError::Obj {
        path: path.to_path_buf(),
        source,
    })?;

    let materials = materials.unwrap_or_else(|err| {
        log::debug!("no materials for {}: {err}", path.display());
        Vec::new()
    });

    let mut root = NodeTree::new(SceneNode {
        name: Some(model.name.clone()),
        transform: model.transform,
        ..SceneNode::default()
    });

    for part in &models {
        let mesh = &part.mesh;
        if mesh.indices.is_empty() {
            continue;
        }

        let diffuse = mesh
            .material_id
            .and_then(|id| materials.get(id))
            .and_then(|material| material.diffuse)
            .unwrap_or(DEFAULT_DIFFUSE);

        let geometry = GeometryData::from_flat(&mesh.positions, &mesh.normals, mesh.indices.clone());
        log::debug!(
            "{}: part '{}' with {} vertices",
            model.name,
            part.name,
            geometry.vertex_count()
        );

        root = root.with_child(NodeTree::new(
            SceneNode::mesh(geometry, [diffuse[0], diffuse[1], diffuse[2], 1.0])
                .named(format!("{}/{}", model.name, part.name)),
        ));
    }

    if root.children.is_empty() {
        return Err(ContentError::Empty(path.to_path_buf()));
    }

    log::info!("loaded {} ({} parts)", model.name, root.children.len());
    Ok(root)
}

/// A box of the model's footprint resting on the model's position
///
/// The root keeps the model's placement but not its scale, since the
/// footprint is already in world units.
fn slab(model: &DeferredModel) -> NodeTree {
    let [width, height, depth] = model.footprint;
    let root = SceneNode {
        name: Some(model.name.clone()),
        transform: Transform {
            scale: Vector3::new(1.0, 1.0, 1.0),
            ..model.transform
        },
        ..SceneNode::default()
    };

    NodeTree::new(root).with_child(NodeTree::new(
        SceneNode::mesh(generate_cuboid(width, height, depth), model.color)
            .named(format!("{}/body", model.name))
            .at(0.0, height / 2.0, 0.0),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::{io::Write, sync::mpsc};

    fn temp_obj(name: &str, contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kitchenette-{}-{name}.obj", std::process::id()));
        let mut file = std::fs::File::create(&path).expect("create temp obj");
        file.write_all(contents.as_bytes()).expect("write temp obj");
        path
    }

    #[test]
    fn test_missing_file_falls_back_to_placeholder() {
        let model = DeferredModel::obj("OVEN", "/definitely/not/here.obj", [0.6, 0.6, 0.6])
            .at(-2.0, 0.2, -2.0)
            .scaled(0.2);

        assert!(matches!(load(&model), Err(ContentError::Obj { .. })));

        let tree = load_or_placeholder(&model);
        assert_eq!(tree.node.name.as_deref(), Some("OVEN"));
        assert_eq!(tree.node.transform.position, Vector3::new(-2.0, 0.2, -2.0));
        assert_eq!(tree.node.transform.scale, Vector3::new(1.0, 1.0, 1.0));
        assert_eq!(tree.len(), 2);
    }

    #[test]
    fn test_obj_parts_become_children() {
        let path = temp_obj(
            "quad",
            "o quad\nv 0 0 0\nv 1 0 0\nv 1 1 0\nv 0 1 0\nf 1 2 3 4\n",
        );
        let model = DeferredModel::obj("QUAD", &path, [1.0, 1.0, 0.1]).rotated_y(1.5);

        let tree = load(&model).expect("quad loads");
        assert_eq!(tree.node.name.as_deref(), Some("QUAD"));
        assert_eq!(tree.node.transform.rotation.y, cgmath::Rad(1.5));
        assert_eq!(tree.children.len(), 1);

        let mesh = tree.children[0].node.mesh.as_ref().expect("part has a mesh");
        assert_eq!(mesh.geometry().triangle_count(), 2);
        assert_eq!(mesh.color(), [0.8, 0.8, 0.8, 1.0]);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_placard_is_sized_by_text() {
        let short = load(&DeferredModel::placard("MSG", "MSG", 0.2, 0.05)).expect("placard");
        let long = load(&DeferredModel::placard("HELLO", "Fuioyohhh", 0.2, 0.05)).expect("placard");

        let width = |tree: &NodeTree| {
            let bounds = tree.children[0].node.mesh.as_ref().expect("mesh").bounds();
            bounds.max.x - bounds.min.x
        };
        assert!(width(&long) > width(&short));
    }

    #[test]
    fn test_loader_delivers_every_model_in_order() {
        let models = vec![
            DeferredModel::placard("A", "a", 0.2, 0.05),
            DeferredModel::obj("B", "/missing.obj", [1.0, 1.0, 1.0]),
            DeferredModel::placard("C", "c", 0.2, 0.05),
        ];
        let (tx, rx) = mpsc::channel();

        let handle = spawn_loader(models, move |tree| tx.send(tree).is_ok()).expect("spawn");
        handle.join().expect("loader thread");

        let names: Vec<_> = rx.iter().map(|tree| tree.node.name.unwrap_or_default()).collect();
        assert_eq!(names, vec!["A", "B", "C"]);
    }
}
