//! 发送快路径基准：单帧与批量两条路径的构帧加提交吞吐。
//!
//! 出队环使用即弃实现（提交瞬间销毁描述符），因此测得的是软件侧路径本身：
//! 池租借、头部类型映射、负载写入与描述符构造，不含任何硬件交互。

use std::sync::Arc;

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use weft_buffer::SlabFramePool;
use weft_core::queue::{EgressDescriptor, EgressQueue};
use weft_core::{EtherType, LinkConfig, MacAddr, Result};
use weft_link::{FrameSender, HEADER_LEN};

/// 即弃队列：提交即销毁描述符，槽位立刻回池，等价于硬件瞬时发送完成。
struct DiscardQueue;

impl EgressQueue for DiscardQueue {
    fn submit(&self, descriptor: EgressDescriptor) -> Result<()> {
        drop(descriptor);
        Ok(())
    }
}

fn bench_send_path(c: &mut Criterion) {
    let local = MacAddr::new([0x02, 0x00, 0x00, 0x00, 0x00, 0x01]);
    let pool = SlabFramePool::new(64, 2048);
    let sender = FrameSender::new(
        Arc::new(pool),
        DiscardQueue,
        LinkConfig::new(local).with_mtu(2000),
    )
    .expect("基准配置应合法");

    let payload = vec![0xA5u8; 1024];
    let batch_payload = vec![0x5Au8; 256];
    let batch: Vec<&[u8]> = (0..16).map(|_| batch_payload.as_slice()).collect();

    let mut group = c.benchmark_group("frame_build");

    group.throughput(Throughput::Bytes((HEADER_LEN + payload.len()) as u64));
    group.bench_function("send_payload_1k", |b| {
        b.iter(|| {
            sender
                .send_payload(MacAddr::BROADCAST, EtherType::IPV4, &payload)
                .expect("发送应成功")
        })
    });

    group.throughput(Throughput::Bytes(
        ((HEADER_LEN + batch_payload.len()) * batch.len()) as u64,
    ));
    group.bench_function("send_batch_16x256", |b| {
        b.iter(|| {
            sender
                .send_batch(MacAddr::BROADCAST, EtherType::IPV4, &batch)
                .expect("批量发送应成功")
        })
    });

    group.finish();
}

criterion_group!(benches, bench_send_path);
criterion_main!(benches);
