/*
 * @Description  : 本模块提供图像读写相关的功能。
 *                 在本模块中，不严谨地说：
 *                 1. 所谓的image/图像是指任意能被`image`库解码的图像文件；
 *                 2. “灰度”（图）等同于英文中luma、luminance、grey、gray的概念。
 */

use std::path::Path;

use image::{DynamicImage, GrayImage, ImageReader};
use ndarray::Array2;
use thiserror::Error;


/// 图像读写错误
#[derive(Debug, Error)]
pub enum VisionError {
    /// 无法解码（如非图像文件、格式无法识别）
    #[error("图像解码失败: {0}")]
    Decode(#[from] image::ImageError),

    /// 无法打开或读取文件（如子目录）
    #[error("读取图像文件失败: {0}")]
    Io(#[from] std::io::Error),

    /// 像素缓冲与图像尺寸不符
    #[error("像素数据与尺寸不符: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

pub struct Vision {
    // ...
}
impl Vision {
    /// 将本地图像以灰度图的形式加载为`[高, 宽]`的像素矩阵
    ///
    /// 图像格式由文件内容判断，扩展名缺失或与内容不符时仍可正常解码。
    pub fn load_luma_image(path: impl AsRef<Path>) -> Result<Array2<u8>, VisionError> {
        let image = ImageReader::open(path)?.with_guessed_format()?.decode()?;
        Vision::to_luma(&image)
    }

    /// 将任意`DynamicImage`转化为灰度像素矩阵
    ///
    /// 单通道8位图像直接拷贝；其余格式先转为RGB（丢弃alpha通道），
    /// 再按`0.299 * r + 0.587 * g + 0.114 * b`压缩到单通道。
    pub fn to_luma(image: &DynamicImage) -> Result<Array2<u8>, VisionError> {
        let (width, height) = (image.width() as usize, image.height() as usize);
        let luma_data = match image {
            DynamicImage::ImageLuma8(buf) => buf.as_raw().clone(),
            _ => image
                .to_rgb8()
                .pixels()
                .map(|p| {
                    let [r, g, b] = p.0.map(f32::from);
                    (0.299 * r + 0.587 * g + 0.114 * b).round().clamp(0.0, 255.0) as u8
                })
                .collect(),
        };
        Ok(Array2::from_shape_vec((height, width), luma_data)?)
    }

    /// 将灰度像素矩阵保存为本地图像，格式由文件扩展名决定
    pub fn save_luma_image(image: &Array2<u8>, path: impl AsRef<Path>) -> Result<(), VisionError> {
        let (height, width) = image.dim();
        let pixels: Vec<u8> = image.iter().copied().collect();
        // 长度必然等于 width * height
        let buf = GrayImage::from_raw(width as u32, height as u32, pixels).ok_or_else(|| {
            ndarray::ShapeError::from_kind(ndarray::ErrorKind::IncompatibleShape)
        })?;
        buf.save(path)?;
        Ok(())
    }
}
