use bevy::prelude::*;
use particle2d::math::{vector, zero_vector};
use particle2d::{
    Gravity, Particle, ParticleHandle, ParticlePlugin, ParticleSystem, SimulationController,
};

fn app_with_falling_particle() -> (App, ParticleHandle) {
    let mut app = App::new();
    app.add_plugins(ParticlePlugin::default());

    let handle = {
        let mut system = app.world_mut().resource_mut::<ParticleSystem>();
        system.add_global_force(Gravity::default());
        system.add_particle(Particle::new(vector(0.0, 100.0), 1.0, 1.0).unwrap())
    };
    (app, handle)
}

fn tick(app: &mut App) {
    app.world_mut().run_schedule(FixedUpdate);
}

fn velocity(app: &App, handle: ParticleHandle) -> bevy::math::DVec2 {
    app.world()
        .resource::<ParticleSystem>()
        .particle(handle)
        .unwrap()
        .velocity
}

#[test]
fn plugin_steps_on_fixed_update() {
    let (mut app, handle) = app_with_falling_particle();
    assert_eq!(velocity(&app, handle), zero_vector());

    tick(&mut app);
    let after_one = velocity(&app, handle);
    assert!(after_one.y < 0.0);

    tick(&mut app);
    assert!(velocity(&app, handle).y < after_one.y);
}

#[test]
fn paused_simulation_only_advances_on_request() {
    let (mut app, handle) = app_with_falling_particle();
    tick(&mut app);

    app.world_mut().resource_mut::<SimulationController>().pause();
    let paused_at = velocity(&app, handle);
    tick(&mut app);
    tick(&mut app);
    assert_eq!(velocity(&app, handle), paused_at);

    app.world_mut()
        .resource_mut::<SimulationController>()
        .request_step();
    tick(&mut app);
    let stepped = velocity(&app, handle);
    assert!(stepped.y < paused_at.y);

    tick(&mut app);
    assert_eq!(velocity(&app, handle), stepped);
}

#[test]
fn reset_clears_particles_and_pauses() {
    let (mut app, _) = app_with_falling_particle();
    app.world_mut()
        .resource_mut::<SimulationController>()
        .request_reset();
    tick(&mut app);

    assert_eq!(app.world().resource::<ParticleSystem>().particle_count(), 0);
    assert!(app.world().resource::<SimulationController>().is_paused());
}

#[test]
fn existing_particle_system_is_kept() {
    let mut system = ParticleSystem::default();
    system.add_particle(Particle::new(zero_vector(), 1.0, 1.0).unwrap());

    let mut app = App::new();
    app.insert_resource(system);
    app.add_plugins(ParticlePlugin::default());

    assert_eq!(app.world().resource::<ParticleSystem>().particle_count(), 1);
    let timestep = app.world().resource::<Time<Fixed>>().timestep();
    assert!((timestep.as_secs_f64() - 1.0 / 60.0).abs() < 1e-9);
}
