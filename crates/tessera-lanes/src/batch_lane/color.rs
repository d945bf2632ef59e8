// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The default color analysis oracle.

use tessera_core::math::PmColor4f;
use tessera_core::renderer::{ColorAnalysis, ColorAnalyzer, ShadingState};

/// Reports a constant color when every quad has the same color.
///
/// It ignores the shading configuration, so it never folds colors through
/// a shader the way a full processor analysis would.
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformColorAnalyzer;

impl<S: ShadingState> ColorAnalyzer<S> for UniformColorAnalyzer {
    fn analyze(&self, _shading: &S, colors: &mut dyn Iterator<Item = PmColor4f>) -> ColorAnalysis {
        let Some(first) = colors.next() else {
            return ColorAnalysis::Varying;
        };
        for color in colors {
            if color != first {
                return ColorAnalysis::Varying;
            }
        }
        ColorAnalysis::Constant(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tessera_core::renderer::ShadingDescriptor;

    fn analyze(colors: &[PmColor4f]) -> ColorAnalysis {
        UniformColorAnalyzer.analyze(&ShadingDescriptor::default(), &mut colors.iter().copied())
    }

    #[test]
    fn test_identical_colors_are_constant() {
        assert_eq!(
            analyze(&[PmColor4f::RED, PmColor4f::RED, PmColor4f::RED]),
            ColorAnalysis::Constant(PmColor4f::RED)
        );
    }

    #[test]
    fn test_mixed_colors_vary() {
        assert_eq!(
            analyze(&[PmColor4f::RED, PmColor4f::BLUE]),
            ColorAnalysis::Varying
        );
        assert_eq!(analyze(&[]), ColorAnalysis::Varying);
    }

    #[test]
    fn test_late_difference_is_varying() {
        let mut colors = vec![PmColor4f::GREEN; 64];
        colors.push(PmColor4f::new(0.0, 1.0, 0.0, 0.5));
        assert_eq!(analyze(&colors), ColorAnalysis::Varying);
        colors.pop();
        assert_eq!(analyze(&colors), ColorAnalysis::Constant(PmColor4f::GREEN));
    }
}
