use core::cell::Cell;
use critical_section::Mutex;

// 没有 64 位原子操作的目标上也能使用，所以走临界区
static CURRENT_TIME: Mutex<Cell<u64>> = Mutex::new(Cell::new(0));

/// 全局 tick 计数（jiffies）
///
/// 由宿主的时钟中断调用 [`Systick::systick_inc`] 推进，
/// 驱动只读取它来记录访问时间戳。
pub struct Systick;

impl Systick {
    pub fn init() {
        critical_section::with(|cs| CURRENT_TIME.borrow(cs).set(0));
    }

    pub fn systick_inc() {
        critical_section::with(|cs| {
            let now = CURRENT_TIME.borrow(cs);
            now.set(now.get().wrapping_add(1));
        });
    }

    pub fn get_current_time() -> u64 {
        critical_section::with(|cs| CURRENT_TIME.borrow(cs).get())
    }

    /// 一次推进多个 tick，返回推进后的时间
    pub fn add_current_time(ticks: u64) -> u64 {
        critical_section::with(|cs| {
            let now = CURRENT_TIME.borrow(cs);
            now.set(now.get().wrapping_add(ticks));
            now.get()
        })
    }
}
