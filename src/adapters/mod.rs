//! Adapters: concrete implementations of the hexagonal port traits.
//!
//! | Adapter     | Implements   | Connects to                     |
//! |-------------|--------------|---------------------------------|
//! | `linux_i2c` | I2cBus       | `/dev/i2c-N` character device   |
//! | `hal_bus`   | I2cBus       | any `embedded-hal` 1.0 I2C      |
//! | `fifo`      | ChannelPort  | named pipe on the filesystem    |
//! | `time`      | Clock        | local wall clock                |
//! |             | DelayNs      | `std::thread::sleep`            |
//! | `log_sink`  | EventSink    | `log` facade                    |

pub mod fifo;
pub mod hal_bus;
pub mod linux_i2c;
pub mod log_sink;
pub mod time;
