//! Parallax demo: a four-strip scrolling background behind an
//! animated character who walks left and right with the arrow keys.
//! The camera follows the character.

use std::error::Error;
use std::sync::Arc;

use spritely::input::{Input, Key};
use spritely::parallax::{Parallax, ParallaxLayer};
use spritely::ultraviolet::Vec2;
use spritely::wgpu;
use spritely::{
    AnimatedSprite, Camera2D, Clock, EventPhase, Renderer, RendererEvents, SheetRegion,
    SpriteSheet, Transform,
};

const W: f32 = 1024.0;
const H: f32 = 768.0;
const DT: f32 = 1.0 / 60.0;
const WALK_SPEED: f32 = 3.0;

// Animation rows in content/hero.png, six frames each.
const ANIM_IDLE: u16 = 0;
const ANIM_WALK_RIGHT: u16 = 1;
const ANIM_WALK_LEFT: u16 = 2;

fn main() -> Result<(), Box<dyn Error>> {
    spritely::with_default_runtime(
        winit::window::WindowBuilder::new()
            .with_title("parallax")
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
    let bg_img = image::open("content/background.png")?.into_rgba8();
    let bg_tex = renderer.create_texture(
        &bg_img,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        bg_img.dimensions(),
        Some("background.png"),
    );
    // Four viewport-sized strips stacked top to bottom in the sheet:
    // sky, far hills, near hills, foreground.
    let strip = |row: u16| SheetRegion::new(0, row * H as u16, 0, W as u16, H as u16);
    let background = Parallax::new(
        vec![
            ParallaxLayer {
                region: strip(0),
                factor: 0.0,
                depth: 60000,
                y: H / 2.0,
            },
            ParallaxLayer {
                region: strip(1),
                factor: 0.3,
                depth: 40000,
                y: H / 2.0,
            },
            ParallaxLayer {
                region: strip(2),
                factor: 0.6,
                depth: 20000,
                y: H / 2.0,
            },
            ParallaxLayer {
                region: strip(3),
                factor: 1.0,
                depth: 5000,
                y: H / 2.0,
            },
        ],
        Vec2::new(W, H),
    );

    let hero_img = image::open("content/hero.png")?.into_rgba8();
    let hero_tex = renderer.create_texture(
        &hero_img,
        wgpu::TextureFormat::Rgba8UnormSrgb,
        hero_img.dimensions(),
        Some("hero.png"),
    );
    let sheet = SpriteSheet::new(hero_img.width() as u16, hero_img.height() as u16, 3, 6);
    let mut hero = AnimatedSprite::new(sheet, 0.1);
    hero.pos = Vec2::new(W / 2.0, 160.0);
    hero.size = Vec2::new(96.0, 96.0);
    hero.depth = 1000;

    let mut camera = Camera2D {
        screen_pos: [0.0, 0.0],
        screen_size: [W, H],
    };
    let bg_group = renderer.sprite_group_add(
        &bg_tex,
        vec![Transform::default(); background.sprite_count()],
        vec![SheetRegion::default(); background.sprite_count()],
        camera,
    );
    let hero_group = renderer.sprite_group_add(
        &hero_tex,
        vec![Transform::default(); 1],
        vec![SheetRegion::default(); 1],
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
                    let dir = input.key_axis(Key::ArrowLeft, Key::ArrowRight);
                    hero.pos.x += dir * WALK_SPEED;
                    let animation = if dir > 0.0 {
                        ANIM_WALK_RIGHT
                    } else if dir < 0.0 {
                        ANIM_WALK_LEFT
                    } else {
                        ANIM_IDLE
                    };
                    if animation != hero.animation() {
                        hero.set_animation(animation);
                    }
                    hero.tick(DT);
                    input.next_frame();
                }
                camera.screen_pos[0] = hero.pos.x - W / 2.0;
                let (trfs, uvs) = renderer.sprites_mut(bg_group, ..);
                background.fill(&camera, trfs, uvs);
                let (trfs, uvs) = renderer.sprites_mut(hero_group, ..);
                trfs[0] = hero.transform();
                uvs[0] = hero.region();
                renderer.sprite_group_set_camera(bg_group, camera);
                renderer.sprite_group_set_camera(hero_group, camera);
                renderer.render();
            }
            EventPhase::Quit => target.exit(),
            EventPhase::Wait => {}
        }
    })?)
}
