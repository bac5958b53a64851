//! End-to-end skirmish example.
//!
//! Demonstrates: build config → World → register categories → drive the
//! tick pipeline → read metrics → reset → repeat.

use std::f64::consts::PI;
use std::sync::Arc;

use barrage_bench::populate;
use barrage_core::{
    Affine2, AssetId, AssetKind, Attr, BlendMode, Category, CategoryId, CollisionGroup, ColorRgba,
    DrawCommand, HookKind, ObjectHandle, Value, WorldOps,
};
use barrage_engine::{Bounds, World, WorldConfig};

/// A bullet that dies on contact and draws itself as an additive
/// sprite.
struct Shell;

impl Category for Shell {
    fn name(&self) -> &str {
        "shell"
    }

    fn render_hook(&self) -> HookKind {
        HookKind::Scripted
    }

    fn collide_hook(&self) -> HookKind {
        HookKind::Scripted
    }

    fn on_render(&self, world: &mut dyn WorldOps, obj: ObjectHandle) {
        let x = match world.get(obj, Attr::X).unwrap() {
            Value::Num(x) => x,
            _ => return,
        };
        let y = match world.get(obj, Attr::Y).unwrap() {
            Value::Num(y) => y,
            _ => return,
        };
        world.submit_draw(DrawCommand {
            obj,
            asset: AssetId(1),
            kind: AssetKind::Sprite,
            transform: Affine2::from_srt(x, y, 0.0, 1.0, 1.0),
            blend: BlendMode::MulAdd,
            color: ColorRgba::WHITE,
            frame: 0,
        });
    }

    fn on_collide(&self, world: &mut dyn WorldOps, obj: ObjectHandle, other: ObjectHandle) {
        world.delete(other).unwrap();
        world.delete(obj).unwrap();
    }
}

/// Fires a five-shell fan every sixth tick.
struct Turret {
    bullet: CategoryId,
    group: u16,
    heading: f64,
}

impl Category for Turret {
    fn name(&self) -> &str {
        "turret"
    }

    fn frame_hook(&self) -> HookKind {
        HookKind::Scripted
    }

    fn on_frame(&self, world: &mut dyn WorldOps, obj: ObjectHandle) {
        let timer = match world.get(obj, Attr::Timer).unwrap() {
            Value::Int(t) => t,
            _ => return,
        };
        if timer % 6 != 0 {
            return;
        }
        let x = match world.get(obj, Attr::X).unwrap() {
            Value::Num(x) => x,
            _ => return,
        };

        for k in 0..5 {
            let heading = self.heading + (k as f64 - 2.0) * 0.15;
            let shell = world.spawn(self.bullet).unwrap();
            world.set(shell, Attr::X, Value::Num(x)).unwrap();
            world.set(shell, Attr::Vx, Value::Num(5.0 * heading.cos())).unwrap();
            world.set(shell, Attr::Vy, Value::Num(5.0 * heading.sin())).unwrap();
            world.set(shell, Attr::A, Value::Num(4.0)).unwrap();
            world
                .set(shell, Attr::Group, Value::Group(CollisionGroup::Group(self.group)))
                .unwrap();
        }
    }
}

fn tick(world: &mut World) {
    world.frame();
    world.bound_check();
    world.collide_groups(0, 1).unwrap();
    world.render();
    world.after_frame();
}

fn main() {
    println!("=== Barrage Skirmish Example ===\n");

    let mut world = World::new(WorldConfig {
        capacity: 2048,
        collision_groups: 2,
        ..WorldConfig::default()
    })
    .unwrap();

    let shell = world.register_category(Arc::new(Shell));
    let west = world.register_category(Arc::new(Turret {
        bullet: shell,
        group: 0,
        heading: 0.0,
    }));
    let east = world.register_category(Arc::new(Turret {
        bullet: shell,
        group: 1,
        heading: PI,
    }));

    let w = world.create(west).unwrap();
    world.set(w, Attr::X, Value::Num(-150.0)).unwrap();
    let e = world.create(east).unwrap();
    world.set(e, Attr::X, Value::Num(150.0)).unwrap();

    // --- Episode 1: crossfire ---
    println!("Episode 1: 90 ticks of crossfire");
    for t in 0..90 {
        tick(&mut world);

        if t % 15 == 14 {
            let m = world.metrics();
            println!(
                "  tick {:>3}: live={:>4}, contacts={:>3}, draws={:>4}, spawned={:>4}",
                m.tick, m.live_objects, m.contacts, m.draw_commands, m.spawned,
            );
        }
    }

    // --- Reset and Episode 2: drifters against a tight cull box ---
    println!("\nResetting world...");
    world.reset();
    world.set_bounds(Bounds::new(-64.0, 64.0, -48.0, 48.0)).unwrap();

    println!("Episode 2: 30 ticks of drift, no contacts");
    populate(&mut world, shell, 64, 2, 7).unwrap();
    for t in 0..30 {
        world.frame();
        world.bound_check();
        world.render();
        world.after_frame();

        if t % 10 == 9 {
            let m = world.metrics();
            println!(
                "  tick {:>3}: live={:>4}, culled={:>3}, draws={:>4}",
                m.tick, m.live_objects, m.bound_marks, m.draw_commands,
            );
        }
    }

    println!("\nFinal tick: {}", world.metrics().tick);
    println!("Done.");
}
