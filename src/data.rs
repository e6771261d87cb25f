use burn::{
    data::{dataloader::batcher::Batcher, dataset::vision::MnistItem},
    prelude::*,
};

/// Width and height of an MNIST image.
pub const IMAGE_SIZE: usize = 28;

// MNIST mean and standard deviation over the training split.
const MEAN: f32 = 0.1307;
const STD: f32 = 0.3081;

#[derive(Clone, Default)]
pub struct MnistBatcher {}

#[derive(Clone, Debug)]
pub struct MnistBatch<B: Backend> {
    /// Normalized images of shape `[batch_size, 1, 28, 28]`.
    pub images: Tensor<B, 4>,
    /// Class labels of shape `[batch_size]`.
    pub targets: Tensor<B, 1, Int>,
}

impl<B: Backend> Batcher<B, MnistItem, MnistBatch<B>> for MnistBatcher {
    fn batch(&self, items: Vec<MnistItem>, device: &B::Device) -> MnistBatch<B> {
        let images = items
            .iter()
            .map(|item| TensorData::from(item.image).convert::<B::FloatElem>())
            .map(|data| Tensor::<B, 2>::from_data(data, device))
            .map(|tensor| tensor.reshape([1, 1, IMAGE_SIZE, IMAGE_SIZE]))
            // Scale to [0, 1], then standardize.
            .map(|tensor| ((tensor / 255) - MEAN) / STD)
            .collect();

        let targets = items
            .iter()
            .map(|item| {
                Tensor::<B, 1, Int>::from_data(
                    [(item.label as i64).elem::<B::IntElem>()],
                    device,
                )
            })
            .collect();

        let images = Tensor::cat(images, 0);
        let targets = Tensor::cat(targets, 0);

        MnistBatch { images, targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::TestBackend;

    fn item(value: f32, label: u8) -> MnistItem {
        MnistItem {
            image: [[value; IMAGE_SIZE]; IMAGE_SIZE],
            label,
        }
    }

    #[test]
    fn batch_should_stack_images_and_targets() {
        let device = Default::default();
        let items = vec![item(0.0, 3), item(255.0, 7), item(0.0, 1)];
        let batch: MnistBatch<TestBackend> = MnistBatcher::default().batch(items, &device);

        assert_eq!(batch.images.dims(), [3, 1, IMAGE_SIZE, IMAGE_SIZE]);
        assert_eq!(batch.targets.dims(), [3]);
        let targets = batch.targets.into_data().to_vec::<i64>().unwrap();
        assert_eq!(targets, vec![3, 7, 1]);
    }

    #[test]
    fn batch_should_normalize_pixels() {
        let device = Default::default();
        let batch: MnistBatch<TestBackend> =
            MnistBatcher::default().batch(vec![item(0.0, 0), item(255.0, 0)], &device);

        let values = batch.images.into_data().to_vec::<f32>().unwrap();
        let pixels = IMAGE_SIZE * IMAGE_SIZE;

        let black = -MEAN / STD;
        let white = (1.0 - MEAN) / STD;
        assert!((values[0] - black).abs() < 1e-5);
        assert!((values[pixels] - white).abs() < 1e-5);
    }
}
