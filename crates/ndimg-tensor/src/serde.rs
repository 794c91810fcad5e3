use crate::NdArray;

use serde::ser::SerializeStruct;
use serde::Deserialize;

impl<T> serde::Serialize for NdArray<T>
where
    T: serde::Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("NdArray", 2)?;
        state.serialize_field("data", self.as_slice())?;
        state.serialize_field("shape", self.shape())?;
        state.end()
    }
}

impl<'de, T> serde::Deserialize<'de> for NdArray<T>
where
    T: serde::Deserialize<'de>,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(Deserialize)]
        struct ArrayData<T> {
            data: Vec<T>,
            shape: Vec<usize>,
        }

        let ArrayData { data, shape } = ArrayData::deserialize(deserializer)?;

        NdArray::from_shape_vec(&shape, data).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serde() -> Result<(), Box<dyn std::error::Error>> {
        let array = NdArray::<u8>::from_shape_vec(&[2, 3], vec![1, 2, 3, 4, 5, 6])?;
        let serialized = serde_json::to_string(&array)?;
        let deserialized: NdArray<u8> = serde_json::from_str(&serialized)?;
        assert_eq!(array, deserialized);
        Ok(())
    }

    #[test]
    fn test_serde_rejects_bad_shape() {
        let res: Result<NdArray<u8>, _> = serde_json::from_str(r#"{"data":[1,2,3],"shape":[2,2]}"#);
        assert!(res.is_err());
    }
}
