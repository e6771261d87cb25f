use burn::data::dataset::{vision::MnistItem, InMemDataset};

pub type TestBackend = burn::backend::NdArray<f32>;
pub type TestAutodiffBackend = burn::backend::Autodiff<TestBackend>;

const SIZE: usize = 28;

/// Digits drawn as a horizontal stripe whose height depends on the label.
///
/// Items are shifted horizontally so that the train and test splits do not share images.
pub fn stripes(num_items: usize, shift: usize) -> InMemDataset<MnistItem> {
    let items = (0..num_items)
        .map(|i| {
            let label = i % 10;
            let offset = (i / 10 + shift) % 6;
            let mut image = [[0.0; SIZE]; SIZE];

            for row in image.iter_mut().skip(2 + 2 * label).take(2) {
                for pixel in row.iter_mut().skip(offset + 1).take(20) {
                    *pixel = 255.0;
                }
            }

            MnistItem {
                image,
                label: label as u8,
            }
        })
        .collect();

    InMemDataset::new(items)
}
