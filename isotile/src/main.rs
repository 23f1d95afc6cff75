//! Isometric demo: a 3x3 diamond tile map and a cursor steered with
//! W/A/S/D plus Q/E/Z/C for diagonals.  The cursor's tile is drawn
//! with the tileset's highlight cell.

use std::error::Error;
use std::sync::Arc;

use spritely::input::{Input, Key};
use spritely::tiles::{Cursor, TileMap, Tileset};
use spritely::ultraviolet::Vec2;
use spritely::wgpu;
use spritely::{Camera2D, Clock, EventPhase, Renderer, RendererEvents, SheetRegion, Transform};

const W: f32 = 800.0;
const H: f32 = 600.0;
const DT: f32 = 1.0 / 60.0;

// (key, di, dj): W/S step away from/toward the viewer on j, A/D on i,
// and Q/E/Z/C take the diagonals.
const CURSOR_KEYS: [(Key, i32, i32); 8] = [
    (Key::KeyW, 0, -1),
    (Key::KeyS, 0, 1),
    (Key::KeyA, -1, 0),
    (Key::KeyD, 1, 0),
    (Key::KeyQ, -1, -1),
    (Key::KeyE, 1, -1),
    (Key::KeyZ, -1, 1),
    (Key::KeyC, 1, 1),
];

fn main() -> Result<(), Box<dyn Error>> {
    spritely::with_default_runtime(
        winit::window::WindowBuilder::new()
            .with_title("isotile")
            .with_inner_size(winit::dpi::LogicalSize::new(W as f64, H as f64)),
        |event_loop, window, renderer| {
            if let Err(err) = run(event_loop, window, renderer) {
                log::error!("demo exited with error: {err}");
                std::process::exit(1);
            }
        },
    )
}

fn run(
    event_loop: winit::event_loop::EventLoop<()>,
    window: Arc<winit::window::Window>,
    mut renderer: Renderer,
) -> Result<(), Box<dyn Error>> {
    let tiles_img = image::open("content/tileset.png")?.into_rgba8();
    let tiles_tex = renderer.create_texture(
        &tiles_img,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        tiles_img.dimensions(),
        Some("tileset.png"),
    );
    // Seven 128x64 diamonds in a row; the last one is the highlight.
    let tileset = Tileset::new(128, 64, 7, 6);
    let map = TileMap::new(
        3,
        3,
        [1, 4, 4, 1, 1, 4, 4, 4, 1],
        tileset,
        Vec2::new(400.0, 500.0),
    );
    let mut cursor = Cursor::new(1, 1);

    let camera = Camera2D {
        screen_pos: [0.0, 0.0],
        screen_size: [W, H],
    };
    let tile_group = renderer.sprite_group_add(
        &tiles_tex,
        vec![Transform::default(); map.sprite_count()],
        vec![SheetRegion::default(); map.sprite_count()],
        camera,
    );

    let mut clock = Clock::new(DT, 0.0002, 5);
    let mut input = Input::default();
    Ok(event_loop.run(move |event, target| {
        match renderer.handle_event(&mut clock, &window, &event, target, &mut input) {
            EventPhase::Run(steps) => {
                for _ in 0..steps {
                    if input.is_key_pressed(Key::Escape) {
                        target.exit();
                    }
                    for (key, di, dj) in CURSOR_KEYS {
                        if input.is_key_pressed(key) {
                            cursor.step(di, dj, &map);
                        }
                    }
                    input.next_frame();
                }
                let (trfs, uvs) = renderer.sprites_mut(tile_group, ..);
                map.fill(&cursor, trfs, uvs);
                renderer.render();
            }
            EventPhase::Quit => target.exit(),
            EventPhase::Wait => {}
        }
    })?)
}
