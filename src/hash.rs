use crate::Md5Error;

pub trait Hasher<const N: usize>: Default {
    fn update(&mut self, data: &[u8]) -> Result<(), Md5Error>;

    fn finalize(&mut self) -> [u8; N];

    fn digest_message(message: &[u8]) -> Result<[u8; N], Md5Error> {
        let mut hasher = Self::default();
        hasher.update(message)?;
        Ok(hasher.finalize())
    }

    fn update_and_digest(mut self, message: &[u8]) -> Result<[u8; N], Md5Error> {
        self.update(message)?;
        Ok(self.finalize())
    }
}
