// demos/basic_roll.rs
// Throws a die a few times, then steers one throw to a chosen face.

use rand::rngs::StdRng;
use rand::SeedableRng;
use rs_dice::apis::DiceRoller;
use rs_dice::correction::PresentationPose;
use rs_dice::errors::DiceError;

fn main() -> Result<(), DiceError> {
    env_logger::init();

    let mut roller = DiceRoller::new();
    let mut rng = StdRng::seed_from_u64(7);

    for _ in 0..3 {
        let request = rs_dice::apis::random_throw(&mut rng, 6.0, 20.0);
        let outcome = roller.run_request(request)?;
        println!(
            "rolled {} after {} steps ({:?})",
            outcome.face, outcome.steps, outcome.resolution
        );
    }

    let steered = roller.roll_with_outcome(6, &mut rng)?;
    let shown = PresentationPose::new(steered.outcome.final_pose, steered.correction);
    println!(
        "physics rolled {}, shown as {} (correction of {:.1} degrees)",
        shown.physical_face(roller.atlas()),
        shown.displayed_face(roller.atlas()),
        steered.correction.angle().to_degrees()
    );

    // Replay the first few presentation frames of the steered throw
    roller.replay()?;
    for frame in 0..5 {
        if let Some(pose) = roller.tick() {
            let displayed = pose.displayed();
            println!("frame {}: position {:?}", frame, displayed.position);
        }
    }
    Ok(())
}
