//! Built-in models and the counts the simulation keeps for them
//!
//! The simulation core treats geometry as opaque. This module plays the mesh
//! provider: it builds the meshes once and hands out [`MeshHandle`]s that carry
//! only identifiers and counts.

use crate::components::MeshHandle;
use crate::config::Model;
use bevy::prelude::*;
use bevy::render::mesh::SphereKind;
use std::collections::HashMap;

#[derive(Resource, Debug, Clone)]
pub struct MeshLibrary {
    entries: HashMap<Model, (MeshHandle, Mesh)>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        let models = [
            (Model::Cube, Mesh::from(Cuboid::from_length(2.0))),
            (
                Model::Sphere,
                Sphere::new(1.0)
                    .mesh()
                    .kind(SphereKind::Ico { subdivisions: 3 })
                    .build(),
            ),
        ];

        let entries = models
            .into_iter()
            .enumerate()
            .map(|(id, (model, mesh))| {
                let handle = describe(id as u32, &mesh);
                debug!(
                    "Registered {:?} mesh: {} vertices, {} indices, {} normals",
                    model, handle.vertex_count, handle.index_count, handle.normal_count
                );
                (model, (handle, mesh))
            })
            .collect();

        Self { entries }
    }

    pub fn handle(&self, model: Model) -> MeshHandle {
        self.entries
            .get(&model)
            .map(|(handle, _)| *handle)
            .unwrap_or_default()
    }

    /// Every model with its handle and geometry
    pub fn iter(&self) -> impl Iterator<Item = (Model, MeshHandle, &Mesh)> {
        self.entries
            .iter()
            .map(|(model, (handle, mesh))| (*model, *handle, mesh))
    }
}

impl Default for MeshLibrary {
    fn default() -> Self {
        Self::new()
    }
}

fn describe(id: u32, mesh: &Mesh) -> MeshHandle {
    MeshHandle {
        id,
        vertex_count: mesh.count_vertices(),
        index_count: mesh.indices().map_or(0, |indices| indices.len()),
        normal_count: mesh
            .attribute(Mesh::ATTRIBUTE_NORMAL)
            .map_or(0, |normals| normals.len()),
    }
}
