use bxf_image::{Image, ImageSize};

use crate::error::ArgsError;

/// Element class of a host array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassId {
    /// 8-bit unsigned integers.
    Uint8,
    /// Booleans.
    Logical,
    /// 64-bit floats.
    Double,
    /// 32-bit floats.
    Single,
}

/// Typed storage of a host array, column-major.
#[derive(Debug, Clone, PartialEq)]
pub enum HostData {
    /// 8-bit unsigned samples.
    Uint8(Vec<u8>),
    /// Boolean samples.
    Logical(Vec<bool>),
    /// 64-bit float samples.
    Double(Vec<f64>),
    /// 32-bit float samples.
    Single(Vec<f32>),
}

impl HostData {
    fn len(&self) -> usize {
        match self {
            HostData::Uint8(v) => v.len(),
            HostData::Logical(v) => v.len(),
            HostData::Double(v) => v.len(),
            HostData::Single(v) => v.len(),
        }
    }
}

/// A dense n-dimensional array as handed over by a numerical host.
///
/// Dimensions follow the host convention: `dims[0]` is the number of rows (M) and the
/// remaining dimensions collapse into the number of columns (N). Data is stored in
/// column-major order, element `(i, j)` of a 2-D array living at `i + j * M`.
#[derive(Debug, Clone, PartialEq)]
pub struct HostArray {
    dims: Vec<usize>,
    data: HostData,
}

impl HostArray {
    /// Create a new host array.
    ///
    /// # Errors
    ///
    /// If the data length does not match the product of the dimensions.
    pub fn new(dims: Vec<usize>, data: HostData) -> Result<Self, ArgsError> {
        let numel = dims.iter().product::<usize>();
        if numel != data.len() {
            return Err(ArgsError::InvalidDataLength(data.len(), numel));
        }
        Ok(Self { dims, data })
    }

    /// Create a `rows x 1` double column vector.
    pub fn column(values: Vec<f64>) -> Self {
        Self {
            dims: vec![values.len(), 1],
            data: HostData::Double(values),
        }
    }

    /// Create an `H x W` uint8 array from a single channel image.
    pub fn from_image_u8(image: &Image<u8, 1>) -> Self {
        Self {
            dims: vec![image.height(), image.width()],
            data: HostData::Uint8(to_column_major(image.as_slice(), image.size())),
        }
    }

    /// Create an `H x W` logical array from a mask image.
    pub fn from_mask(mask: &Image<bool, 1>) -> Self {
        Self {
            dims: vec![mask.height(), mask.width()],
            data: HostData::Logical(to_column_major(mask.as_slice(), mask.size())),
        }
    }

    /// The element class.
    pub fn class_id(&self) -> ClassId {
        match self.data {
            HostData::Uint8(_) => ClassId::Uint8,
            HostData::Logical(_) => ClassId::Logical,
            HostData::Double(_) => ClassId::Double,
            HostData::Single(_) => ClassId::Single,
        }
    }

    /// The dimensions of the array.
    pub fn dims(&self) -> &[usize] {
        &self.dims
    }

    /// The number of dimensions.
    pub fn num_dims(&self) -> usize {
        self.dims.len()
    }

    /// The number of rows (first dimension).
    pub fn m(&self) -> usize {
        self.dims.first().copied().unwrap_or(0)
    }

    /// The number of columns, the product of all trailing dimensions.
    pub fn n(&self) -> usize {
        self.dims.iter().skip(1).product()
    }

    /// The number of elements.
    pub fn numel(&self) -> usize {
        self.data.len()
    }

    /// The raw column-major data.
    pub fn data(&self) -> &HostData {
        &self.data
    }

    /// Convert a 2-D uint8 array into a row-major image.
    ///
    /// Returns `None` if the array is not uint8.
    pub fn to_image_u8(&self) -> Option<Result<Image<u8, 1>, ArgsError>> {
        match &self.data {
            HostData::Uint8(v) => Some(self.to_image(v)),
            _ => None,
        }
    }

    /// Convert a 2-D logical array into a row-major mask.
    ///
    /// Returns `None` if the array is not logical.
    pub fn to_mask(&self) -> Option<Result<Image<bool, 1>, ArgsError>> {
        match &self.data {
            HostData::Logical(v) => Some(self.to_image(v)),
            _ => None,
        }
    }

    /// The samples of a double array.
    pub fn as_f64(&self) -> Option<&[f64]> {
        match &self.data {
            HostData::Double(v) => Some(v),
            _ => None,
        }
    }

    fn to_image<T: Copy>(&self, data: &[T]) -> Result<Image<T, 1>, ArgsError> {
        let size = ImageSize {
            width: self.n(),
            height: self.m(),
        };
        Ok(Image::new(size, to_row_major(data, size))?)
    }
}

/// Reorder column-major samples into row-major order.
pub fn to_row_major<T: Copy>(data: &[T], size: ImageSize) -> Vec<T> {
    let (rows, cols) = (size.height, size.width);
    let mut out = Vec::with_capacity(data.len());
    for y in 0..rows {
        for x in 0..cols {
            out.push(data[y + x * rows]);
        }
    }
    out
}

/// Reorder row-major samples into column-major order.
pub fn to_column_major<T: Copy>(data: &[T], size: ImageSize) -> Vec<T> {
    let (rows, cols) = (size.height, size.width);
    let mut out = Vec::with_capacity(data.len());
    for x in 0..cols {
        for y in 0..rows {
            out.push(data[y * cols + x]);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn host_array_shape() -> Result<(), ArgsError> {
        let a = HostArray::new(vec![2, 3, 4], HostData::Double(vec![0.0; 24]))?;
        assert_eq!(a.num_dims(), 3);
        assert_eq!(a.m(), 2);
        assert_eq!(a.n(), 12);
        assert_eq!(a.numel(), 24);
        assert_eq!(a.class_id(), ClassId::Double);

        let res = HostArray::new(vec![2, 2], HostData::Uint8(vec![0; 3]));
        assert_eq!(res, Err(ArgsError::InvalidDataLength(3, 4)));
        Ok(())
    }

    #[test]
    fn column_major_layout() -> Result<(), ArgsError> {
        // [[1, 2, 3],
        //  [4, 5, 6]] stored by columns
        let a = HostArray::new(vec![2, 3], HostData::Uint8(vec![1, 4, 2, 5, 3, 6]))?;
        let image = a.to_image_u8().ok_or(ArgsError::InvalidDataLength(0, 0))??;
        assert_eq!(image.width(), 3);
        assert_eq!(image.height(), 2);
        assert_eq!(image.as_slice(), &[1, 2, 3, 4, 5, 6]);

        let back = HostArray::from_image_u8(&image);
        assert_eq!(back, a);
        Ok(())
    }

    #[test]
    fn logical_column_major_layout() -> Result<(), ArgsError> {
        // [[true, false, false],
        //  [false, false, true]] stored by columns
        let a = HostArray::new(
            vec![2, 3],
            HostData::Logical(vec![true, false, false, false, false, true]),
        )?;
        let mask = a.to_mask().ok_or(ArgsError::InvalidDataLength(0, 0))??;
        assert_eq!(mask.width(), 3);
        assert_eq!(mask.height(), 2);
        assert_eq!(mask.as_slice(), &[true, false, false, false, false, true]);
        assert_eq!(a.class_id(), ClassId::Logical);

        let back = HostArray::from_mask(&mask);
        assert_eq!(back, a);
        Ok(())
    }

    #[test]
    fn typed_accessors() {
        let a = HostArray::column(vec![1.0, 2.0]);
        assert_eq!(a.dims(), &[2, 1]);
        assert_eq!(a.as_f64(), Some(&[1.0, 2.0][..]));
        assert!(a.to_image_u8().is_none());
        assert!(a.to_mask().is_none());
    }
}
