//! 固定槽位帧池契约验证
//!
//! # 核心目标（Why）
//! - 池的生命周期闭环完全由 `Drop` 驱动：帧无论是构帧失败原地销毁，
//!   还是随出队描述符完成发送后销毁，槽位都必须回池。本文件覆盖两条回收路径、
//!   耗尽语义与复用时的内容清零。

use weft_buffer::SlabFramePool;
use weft_core::buffer::FramePool;
use weft_core::error::codes;
use weft_core::queue::EgressDescriptor;

/// 池空时租借失败，租约销毁后槽位回池、再次租借成功。
#[test]
fn exhaustion_recovers_after_lease_drop() {
    let pool = SlabFramePool::new(1, 128);

    let lease = pool.acquire(100).expect("首次租借应成功");
    let err = pool.acquire(100).expect_err("唯一槽位已借出，池应耗尽");
    assert_eq!(err.code(), codes::POOL_EXHAUSTED);
    assert!(err.is_recoverable(), "池耗尽应标记为可退避重试");

    drop(lease);
    let stats = pool.statistics().expect("读取统计失败");
    assert_eq!(stats.available_slots, 1);
    assert_eq!(stats.active_leases, 0);

    pool.acquire(100).expect("回收后租借应再次成功");
}

/// 帧随描述符移交后，描述符的销毁同样驱动回收（模拟硬件发送完成）。
#[test]
fn descriptor_drop_reclaims_slot() {
    let pool = SlabFramePool::new(1, 128);

    let frame = pool.acquire(64).expect("租借应成功");
    let descriptor = EgressDescriptor::new(frame, 64).expect("描述符应合法");
    assert_eq!(pool.statistics().expect("读取统计失败").available_slots, 0);

    drop(descriptor);
    let stats = pool.statistics().expect("读取统计失败");
    assert_eq!(stats.available_slots, 1);
    assert_eq!(stats.active_leases, 0);
}

/// 槽位复用时内容重新清零，上一帧的残留字节不可见。
#[test]
fn reused_slot_is_rezeroed() {
    let pool = SlabFramePool::new(1, 64);

    {
        let mut frame = pool.acquire(32).expect("租借应成功");
        frame.as_mut_slice().fill(0xEE);
    }

    let frame = pool.acquire(48).expect("复用租借应成功");
    assert_eq!(frame.len(), 48);
    assert!(
        frame.as_slice().iter().all(|&b| b == 0),
        "复用槽位必须清零，残留字节会泄漏上一帧内容"
    );
}

/// 多槽位池的统计快照随租借与归还同步变化。
#[test]
fn statistics_track_lease_lifecycle() {
    let pool = SlabFramePool::new(4, 256);
    assert_eq!(pool.slot_bytes(), 256);

    let a = pool.acquire(256).expect("租借应成功");
    let b = pool.acquire(1).expect("租借应成功");

    let stats = pool.statistics().expect("读取统计失败");
    assert_eq!(stats.total_slots, 4);
    assert_eq!(stats.available_slots, 2);
    assert_eq!(stats.active_leases, 2);
    assert_eq!(stats.slot_bytes, 256);

    drop(a);
    drop(b);
    let stats = pool.statistics().expect("读取统计失败");
    assert_eq!(stats.available_slots, 4);
    let reclaimed = stats
        .custom_dimensions
        .iter()
        .find(|dim| dim.key == "reclaimed_frames")
        .expect("应暴露回收计数维度");
    assert_eq!(reclaimed.value, 2);
}
