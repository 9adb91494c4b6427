//! JDK 信息查询：JDK 目录定位、编译/链接参数生成以及属性报告。

pub mod flags;
pub mod home;
pub mod report;

pub use flags::*;
pub use home::*;
pub use report::*;
