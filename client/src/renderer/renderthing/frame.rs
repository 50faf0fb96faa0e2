use libca::paint::{Color, DrawInstruction, PIXEL_BITS};

pub struct RenderFrame<'a> {
    pub width: u32,
    pub height: u32,
    pub buffer: &'a mut [u8],
}

impl<'a> RenderFrame<'a> {
    pub fn pixels_mut(&mut self) -> impl Iterator<Item = &mut [u8; PIXEL_BITS]> {
        self.buffer
            .chunks_exact_mut(PIXEL_BITS)
            .filter_map(|chunk| chunk.try_into().ok())
    }

    pub fn pixel_mut(&mut self, x: u32, y: u32) -> Option<&mut [u8; PIXEL_BITS]> {
        let index = self.pixel_index(x, y)?;

        self.buffer[index..index + PIXEL_BITS]
            .as_mut()
            .try_into()
            .ok()
    }

    pub fn draw_pixel(&mut self, x: u32, y: u32, color: Color) {
        if let Some(pixel) = self.pixel_mut(x, y) {
            *pixel = color;
        }
    }

    /// Fills a rectangle, clipped to the frame.
    pub fn draw_square(&mut self, x: u32, y: u32, width: u32, height: u32, color: Color) {
        for y in y..y.saturating_add(height).min(self.height) {
            for x in x..x.saturating_add(width).min(self.width) {
                self.draw_pixel(x, y, color);
            }
        }
    }

    /// A filled rectangle with a one pixel outline.
    pub fn draw_outlined_square(
        &mut self,
        x: u32,
        y: u32,
        width: u32,
        height: u32,
        fill: Color,
        border: Color,
    ) {
        self.draw_square(x, y, width, height, border);

        if width > 2 && height > 2 {
            self.draw_square(x + 1, y + 1, width - 2, height - 2, fill);
        }
    }

    pub fn draw_instruction(&mut self, instruction: &DrawInstruction) {
        self.draw_outlined_square(
            instruction.x,
            instruction.y,
            instruction.width,
            instruction.height,
            instruction.fill,
            instruction.border,
        );
    }

    pub fn fill(&mut self, color: Color) {
        for pixel in self.pixels_mut() {
            *pixel = color;
        }
    }

    fn pixel_index(&self, x: u32, y: u32) -> Option<usize> {
        if x >= self.width || y >= self.height {
            return None;
        }

        let index = (x as usize + y as usize * self.width as usize) * PIXEL_BITS;

        (index + PIXEL_BITS <= self.buffer.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Color = [255, 0, 0, 255];
    const BLUE: Color = [0, 0, 255, 255];

    fn pixel_at(buffer: &[u8], width: u32, x: u32, y: u32) -> Color {
        let index = (x + y * width) as usize * PIXEL_BITS;
        buffer[index..index + PIXEL_BITS].try_into().unwrap()
    }

    #[test]
    fn test_fill_touches_last_pixel() {
        let mut buffer = vec![0; 4 * 4 * PIXEL_BITS];
        let mut frame = RenderFrame {
            width: 4,
            height: 4,
            buffer: &mut buffer,
        };

        frame.fill(RED);
        frame.draw_pixel(3, 3, BLUE);

        assert_eq!(pixel_at(&buffer, 4, 0, 0), RED);
        assert_eq!(pixel_at(&buffer, 4, 3, 3), BLUE);
    }

    #[test]
    fn test_draw_square_is_clipped() {
        let mut buffer = vec![0; 4 * 4 * PIXEL_BITS];
        let mut frame = RenderFrame {
            width: 4,
            height: 4,
            buffer: &mut buffer,
        };

        frame.draw_square(3, 2, 10, 10, RED);

        assert_eq!(pixel_at(&buffer, 4, 3, 2), RED);
        assert_eq!(pixel_at(&buffer, 4, 3, 3), RED);
        // Clipped pixels must not spill into the start of the next row.
        assert_eq!(pixel_at(&buffer, 4, 0, 3), [0; 4]);
        assert_eq!(pixel_at(&buffer, 4, 2, 2), [0; 4]);
    }

    #[test]
    fn test_outlined_square() {
        let mut buffer = vec![0; 4 * 4 * PIXEL_BITS];
        let mut frame = RenderFrame {
            width: 4,
            height: 4,
            buffer: &mut buffer,
        };

        frame.draw_instruction(&DrawInstruction {
            x: 0,
            y: 0,
            width: 3,
            height: 3,
            fill: BLUE,
            border: RED,
        });

        assert_eq!(pixel_at(&buffer, 4, 1, 1), BLUE);
        assert_eq!(pixel_at(&buffer, 4, 0, 1), RED);
        assert_eq!(pixel_at(&buffer, 4, 2, 2), RED);
        assert_eq!(pixel_at(&buffer, 4, 3, 3), [0; 4]);
    }
}
