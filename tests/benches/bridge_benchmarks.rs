//! # MME Bridge Benchmarks
//!
//! | Area | Operation |
//! |------|-----------|
//! | Identity | `Imsi::parse` on the dispatch path |
//! | Result mapping | `map_result` for each outcome class |
//! | Completion | translate + post one answer to a task inbox |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::sync::Arc;

use s6a_proxy::domain::EutranVectorWire;
use s6a_proxy::{
    map_result, AuthenticationInformationAnswer, CompletionHandler, ProtocolErrorCode,
    RemoteOutcome, RequestContext, RequestKind, TransportCode, TransportFailure, TransportStatus,
};
use shared_bus::InMemoryTaskBus;
use shared_types::{Imsi, TaskId};

fn bench_imsi_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("identity");

    group.bench_function("imsi_parse_15_digits", |b| {
        b.iter(|| black_box(Imsi::parse(black_box("001010000000001")).is_ok()))
    });
    group.bench_function("imsi_parse_rejects_non_digit", |b| {
        b.iter(|| black_box(Imsi::parse(black_box("00101000000000x")).is_err()))
    });

    group.finish();
}

fn bench_map_result(c: &mut Criterion) {
    let mut group = c.benchmark_group("result-mapping");
    let failed = TransportStatus::Failed(TransportFailure::new(
        TransportCode::Unavailable,
        "unavailable",
    ));

    for code in [
        ProtocolErrorCode::SUCCESS,
        ProtocolErrorCode::LIMITED_SUCCESS,
        ProtocolErrorCode::UNKNOWN_SESSION_ID,
    ] {
        group.bench_with_input(BenchmarkId::new("transport_ok", code.value()), &code, |b, code| {
            b.iter(|| black_box(map_result(&TransportStatus::Ok, *code)))
        });
    }
    group.bench_function("transport_failed", |b| {
        b.iter(|| black_box(map_result(&failed, ProtocolErrorCode::SUCCESS)))
    });

    group.finish();
}

fn bench_completion_to_inbox(c: &mut Criterion) {
    let mut group = c.benchmark_group("completion");

    let bus = Arc::new(InMemoryTaskBus::new());
    let mut inbox = bus.register_task(TaskId::NasMme);
    let handler = CompletionHandler::new(Arc::clone(&bus));
    let imsi = Imsi::parse("001010000000001").unwrap();

    for vectors in [1usize, 5] {
        let answer = AuthenticationInformationAnswer {
            error_code: ProtocolErrorCode::SUCCESS,
            eutran_vectors: (0..vectors)
                .map(|_| EutranVectorWire {
                    rand: vec![0x11; 16],
                    xres: vec![0x22; 8],
                    autn: vec![0x33; 16],
                    kasme: vec![0x44; 32],
                })
                .collect(),
        };

        group.throughput(Throughput::Elements(1));
        group.bench_with_input(
            BenchmarkId::new("auth_info_answer", vectors),
            &answer,
            |b, answer| {
                b.iter(|| {
                    let ctx = RequestContext::capture(RequestKind::AuthenticationInfo, imsi, 15);
                    handler.on_authentication_info(ctx, RemoteOutcome::ok(answer.clone()));
                    black_box(inbox.try_recv().ok().flatten())
                })
            },
        );
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_imsi_parse,
    bench_map_result,
    bench_completion_to_inbox
);
criterion_main!(benches);
