//! # VOC Torch
//!
//! `voc_torch`负责把[PASCAL VOC](http://host.robots.ox.ac.uk/pascal/VOC/)布局的目标检测数据集
//! 变成可按索引随机访问的样本（图像、框、标签），供训练或评估循环按批次取用。
//!

pub mod data;
pub mod utils;
pub mod vision;
