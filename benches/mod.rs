use criterion::{criterion_group, criterion_main};

mod network {
    pub mod application {
        pub mod mqtt {
            pub mod packet;
        }
    }
}

criterion_group!(
    benches,
    network::application::mqtt::packet::bench_connect,
    network::application::mqtt::packet::bench_publish,
    network::application::mqtt::packet::bench_subscribe
);
criterion_main!(benches);
