//! # 驱动辅助宏
//!
//! ## 使用示例
//!
//! ```rust
//! use chip_i2c::bitfield;
//!
//! bitfield! {
//!     /// 方向寄存器
//!     pub struct DirBits(u8) {
//!         pin0: 0,
//!         pin7: 7,
//!     }
//! }
//!
//! let dir = DirBits::from_raw(0x81);
//! assert!(dir.pin0() && dir.pin7());
//! ```

/// 定义位域的宏
///
/// 用于定义寄存器或功能字中的单个位。
///
/// # 生成内容
///
/// - `from_raw()` / `raw()`
/// - 每个位的读取方法 `field()`
/// - 每个位的设置方法 `set_field()`
/// - 与原始类型之间的 `From` 转换，以及 `Debug`
#[macro_export]
macro_rules! bitfield {
    (
        $(#[$meta:meta])*
        pub struct $name:ident($type:ty) {
            $(
                $(#[$field_meta:meta])*
                $field:ident: $bit:tt
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq)]
        pub struct $name($type);

        impl $name {
            /// 从原始值创建
            pub const fn from_raw(value: $type) -> Self {
                Self(value)
            }

            /// 获取原始值
            pub const fn raw(&self) -> $type {
                self.0
            }

            $(
                $crate::paste::paste! {
                    $(#[$field_meta])*
                    #[inline]
                    pub const fn $field(&self) -> bool {
                        (self.0 >> $bit) & 1 != 0
                    }

                    /// 设置位域
                    #[inline]
                    pub fn [<set_ $field>](&mut self, value: bool) {
                        if value {
                            self.0 |= 1 << $bit;
                        } else {
                            self.0 &= !(1 << $bit);
                        }
                    }
                }
            )*
        }

        impl From<$type> for $name {
            fn from(value: $type) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $type {
            fn from(value: $name) -> Self {
                value.0
            }
        }

        impl core::fmt::Debug for $name {
            fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
                f.debug_struct(stringify!($name))
                    .field("raw", &self.0)
                    $(
                        .field(stringify!($field), &self.$field())
                    )*
                    .finish()
            }
        }
    };
}

// ============================================================================
// 单元测试
// ============================================================================
