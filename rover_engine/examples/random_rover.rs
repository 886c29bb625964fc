use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rover_engine::{
    ChannelNotifier, Command, GridBounds, Heading, Instructions, MemoryRunRecorder, MoveRequest,
    RoverService, RunEvent,
};
use std::thread;

struct RandomDriver {
    rng: StdRng,
}

impl RandomDriver {
    fn new(seed: u64) -> RandomDriver {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    fn request(&mut self, bounds: &GridBounds) -> MoveRequest {
        let x = self.rng.gen_range(bounds.min_x()..=bounds.max_x());
        let y = self.rng.gen_range(bounds.min_y()..=bounds.max_y());
        let heading: Heading = self.rng.gen();

        let length = self.rng.gen_range(1..=8);
        let commands: Vec<Command> = (0..length).map(|_| self.rng.gen()).collect();
        let instructions = match Instructions::new(commands) {
            Ok(instructions) => instructions,
            Err(e) => panic!("Error generating instructions: {}", e),
        };

        MoveRequest::new(
            x.into(),
            y.into(),
            &heading.to_string(),
            &instructions.to_string(),
        )
    }
}

fn main() {
    env_logger::init();

    let (sender, receiver) = crossbeam_channel::bounded::<RunEvent>(16);
    let listener = thread::spawn(move || {
        for event in receiver {
            println!(
                "[{}] {} {} -> {}",
                event.name(),
                event.result.start,
                event.instructions,
                event.result.end
            );
        }
    });

    let bounds = GridBounds::default();
    let service = RoverService::new(
        bounds,
        Box::new(MemoryRunRecorder::new()),
        Box::new(ChannelNotifier::new(sender)),
    );

    let mut driver = RandomDriver::new(0);
    for _ in 0..10 {
        let request = driver.request(&bounds);
        if let Err(e) = service.move_rover(&request) {
            println!("Run rejected: {}", e);
        }
    }

    let runs = match service.logs() {
        Ok(runs) => runs,
        Err(e) => panic!("Error reading the run history: {}", e),
    };
    println!("\n{} of 10 runs finished inside {}", runs.len(), bounds);

    // Dropping the service closes the channel and ends the listener
    drop(service);
    listener.join().unwrap();
}
