use std::cell::Cell;

use event_hub::{Event, EventHub, Events, HubBuilder, Reply, ALL};
use log::{debug, info, warn};

/// Temperature sensor that announces every reading it takes.
struct Thermostat {
    reading: Cell<f32>,
    limit: f32,
    events: EventHub<f32>,
}

event_hub::mix_to!(Thermostat, events, f32);

impl Thermostat {
    fn new(limit: f32) -> Self {
        Thermostat {
            reading: Cell::new(0.0),
            limit,
            events: HubBuilder::new().label("thermostat").build(),
        }
    }

    fn record(&self, value: f32) -> Reply {
        self.reading.set(value);
        self.trigger("reading change", &value)
    }
}

fn main() {
    env_logger::builder().target(env_logger::Target::Stdout).init();

    let thermostat = Thermostat::new(30.0);
    let limit = thermostat.limit;

    thermostat
        .on("reading", move |event: &Event<'_, f32>| *event.args() <= limit)
        .on("reading", |event: &Event<'_, f32>| {
            if event.args().is_nan() {
                Err("sensor returned no value")
            } else {
                Ok(())
            }
        })
        .on("change", |event: &Event<'_, f32>| info!("temperature is now {:.1}", event.args()))
        .on(ALL, |event: &Event<'_, f32>| debug!("observed `{}`", event.name()));

    for value in [21.5, 24.0, f32::NAN, 34.5] {
        let reply = thermostat.record(value);
        if !reply.passed() {
            warn!("reading {:.1} was rejected, limit is {:.1}", value, limit);
        }
    }

    info!("last reading {:.1}", thermostat.reading.get());
}
