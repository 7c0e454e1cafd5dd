//! Trigger queue throughput: register N triggers for one kind and drain them.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_skirmish::core::{PlayerId, TieBreak};
use rust_skirmish::events::EventKind;
use rust_skirmish::triggers::{in_sequence, register, resolve, Completion, Trigger, TriggerHost, TriggerQueue};

struct Host {
    queue: TriggerQueue<Host>,
    finished: u64,
}

impl TriggerHost for Host {
    fn trigger_queue(&mut self) -> &mut TriggerQueue<Self> {
        &mut self.queue
    }
}

impl Host {
    fn new(tie_break: TieBreak) -> Self {
        Self { queue: TriggerQueue::new(tie_break, 4), finished: 0 }
    }
}

const KIND: EventKind = EventKind::COMBAT_PHASE_START;

fn fill(host: &mut Host, count: usize) {
    for i in 0..count {
        let trigger = Trigger::new("bench", KIND, |host: &mut Host, done: Completion| {
            host.finished += 1;
            done.finish(host);
        })
        .with_priority((i % 5) as i32)
        .with_owner(PlayerId::new((i % 4) as u8));
        register(host, trigger);
    }
}

fn bench_drain(c: &mut Criterion) {
    let mut group = c.benchmark_group("drain");
    for count in [8usize, 64, 256] {
        for (label, tie_break) in [
            ("registration", TieBreak::RegistrationOrder),
            ("seat", TieBreak::SeatOrder { first: PlayerId::new(2) }),
        ] {
            group.bench_with_input(BenchmarkId::new(label, count), &count, |b, &count| {
                b.iter(|| {
                    let mut host = Host::new(tie_break);
                    fill(&mut host, count);
                    resolve(&mut host, KIND, |_| {});
                    black_box(host.finished)
                });
            });
        }
    }
    group.finish();
}

fn bench_fan_out(c: &mut Criterion) {
    c.bench_function("in_sequence_256", |b| {
        b.iter(|| {
            let mut host = Host::new(TieBreak::RegistrationOrder);
            in_sequence(
                &mut host,
                0..256u64,
                |host: &mut Host, n, next| {
                    host.finished += n;
                    next(host);
                },
                |_: &mut Host| {},
            );
            black_box(host.finished)
        });
    });
}

criterion_group!(benches, bench_drain, bench_fan_out);
criterion_main!(benches);
