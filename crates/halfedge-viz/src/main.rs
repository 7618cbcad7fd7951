use halfedge_bsp::{HalfEdgeMesh, Highlights, Plane3D, SplitResult, TriMesh};
use halfedge_viz::{Explode, Turntable, draw_edges, draw_faces};
use macroquad::prelude::*;
use nalgebra::Vector3;

const CUBE_SIZE: f32 = 4.0;
/// Pull-apart distance when the halves are separated.
const SEPARATION: f32 = 0.8;

struct Scene {
    mesh: HalfEdgeMesh,
    plane: Plane3D,
    result: SplitResult,
    faces: TriMesh,
    edges: TriMesh,
}

/// Builds a cube and cuts it off-centre, slightly tilted so the cut shows
/// on four faces.
fn build_scene() -> halfedge_bsp::Result<Scene> {
    let mut mesh = HalfEdgeMesh::cube(Vector3::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE), true);
    let plane = Plane3D::new(Vector3::new(1.0, 0.35, 0.0), 0.25 * CUBE_SIZE)?;
    let result = mesh.split_all(&plane)?;
    mesh.check_topology()?;

    let highlights = Highlights::from(&result);
    let faces = mesh.to_tri_mesh_highlighted(&highlights)?;
    let edges = mesh.to_edge_mesh(&highlights);
    Ok(Scene {
        mesh,
        plane,
        result,
        faces,
        edges,
    })
}

#[macroquad::main("Half-Edge Split")]
async fn main() {
    let scene = match build_scene() {
        Ok(scene) => scene,
        Err(err) => {
            eprintln!("failed to build scene: {err}");
            return;
        }
    };
    println!(
        "Split {} polygons into {} front / {} back, {} crossing edges",
        scene.result.spanning.len(),
        scene.result.front.len(),
        scene.result.back.len(),
        scene.result.crossing_edges.len()
    );
    println!(
        "{} live polygons, {} triangles, {} boundary edges",
        scene.mesh.live_polygon_count(),
        scene.faces.triangle_count(),
        scene.mesh.boundary_edges().len()
    );

    let mut camera = Turntable::new(14.0);
    let mut explode = Explode::new(scene.plane.clone());
    let mut separated = false;
    let mut show_faces = true;
    let mut show_edges = true;

    loop {
        camera.update();
        if is_key_pressed(KeyCode::Space) {
            separated = !separated;
        }
        if is_key_pressed(KeyCode::F) {
            show_faces = !show_faces;
        }
        if is_key_pressed(KeyCode::W) {
            show_edges = !show_edges;
        }
        let target = if separated { SEPARATION } else { 0.0 };
        explode.animate(target, get_frame_time());

        clear_background(Color::from_rgba(18, 18, 28, 255));
        set_camera(&camera.camera());

        if show_faces {
            draw_faces(&scene.faces, &explode);
        }
        if show_edges {
            draw_edges(&scene.edges, &explode);
        }

        set_default_camera();

        draw_text(
            &format!(
                "{} live polygons | {} split | {} triangles",
                scene.mesh.live_polygon_count(),
                scene.result.spanning.len(),
                scene.faces.triangle_count()
            ),
            10.0,
            25.0,
            20.0,
            WHITE,
        );
        draw_text(
            "Arrows: rotate | Wheel: zoom | Space: pull apart | F: faces | W: wireframe",
            10.0,
            48.0,
            16.0,
            GRAY,
        );
        draw_text(&format!("FPS: {}", get_fps()), 10.0, 68.0, 16.0, DARKGRAY);

        next_frame().await
    }
}
